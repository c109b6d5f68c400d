//! Image download loop
//!
//! Each discovered image gets exactly one attempt once it decodes: it is
//! marked downloaded before the size check, so a rejected image is never
//! fetched again. The save index only moves when an image is actually
//! written; an index whose write failed is handed back to the ledger.
//! Decoding and encoding run on the blocking pool.

use crate::crawler::fetcher::fetch_bytes;
use crate::crawler::harvester::Harvester;
use crate::output::{ensure_dir, placement, save_image};
use crate::HarvestError;
use std::path::{Path, PathBuf};

/// Result of one image attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The image met the size thresholds and was written here
    Saved(PathBuf),

    /// The image was smaller than the thresholds and was not written
    TooSmall { width: u32, height: u32 },
}

impl Harvester {
    /// Attempts up to `how_many` discovered images that have not been attempted yet
    ///
    /// `how_many` counts attempts, not saves: an image rejected for its size
    /// uses up one unit of the budget. The output folder is created first,
    /// even when the budget is zero.
    ///
    /// # Errors
    ///
    /// A failed fetch or decode aborts the call and the image stays
    /// undownloaded, so the next call retries it. Write failures abort the
    /// call too; the image keeps its downloaded mark but its save index is
    /// taken back.
    pub async fn download(&self, how_many: usize) -> Result<(), HarvestError> {
        ensure_dir(Path::new(&self.config.output.folder))?;

        for _ in 0..how_many {
            let Some(url) = self.state().claim_image() else {
                tracing::debug!("No images left to download");
                break;
            };

            match self.download_one(&url).await {
                Ok(DownloadOutcome::Saved(path)) => {
                    tracing::info!("Downloaded image: {} -> {}", url, path.display());
                }
                Ok(DownloadOutcome::TooSmall { width, height }) => {
                    tracing::info!(
                        "Skipped image because of its size ({}x{}): {}",
                        width,
                        height,
                        url
                    );
                }
                Err(e) => {
                    self.state().ledger.release(&url);
                    return Err(e);
                }
            }
        }

        Ok(())
    }

    /// Fetches, decodes, filters and saves one claimed image
    async fn download_one(&self, url: &str) -> Result<DownloadOutcome, HarvestError> {
        let bytes = fetch_bytes(&self.client, url).await?;

        let owned_url = url.to_string();
        let (image, source_format) = tokio::task::spawn_blocking(move || {
            let source_format = image::guess_format(&bytes).ok();
            image::load_from_memory(&bytes)
                .map(|image| (image, source_format))
                .map_err(|source| HarvestError::Decode {
                    url: owned_url,
                    source,
                })
        })
        .await??;

        let (width, height) = (image.width(), image.height());
        let accepted = width >= self.config.min_width && height >= self.config.min_height;

        let index = {
            let mut state = self.state();
            state.ledger.mark_downloaded(url);
            if !accepted {
                return Ok(DownloadOutcome::TooSmall { width, height });
            }
            state.ledger.allocate_index()
        };

        let target = placement(&self.config.output, url, index);
        let path = target.path.clone();
        let written = tokio::task::spawn_blocking(move || {
            if let Some(folder) = &target.folder {
                ensure_dir(folder)?;
            }
            save_image(&image, &target.path, source_format)
        })
        .await
        .map_err(HarvestError::from)
        .and_then(|result| result);

        if let Err(e) = written {
            self.state().ledger.reclaim_index(index);
            return Err(e);
        }

        Ok(DownloadOutcome::Saved(path))
    }
}
