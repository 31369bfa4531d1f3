//! # Chunk Sources
//!
//! A [`ChunkSource`] resolves page numbers to page bytes. The map layer
//! treats a fetched page as borrowed for the duration of a scan; it never
//! mutates pages and never caches them itself. Remote implementations may
//! block inside `fetch` (the scan iterator is the only caller that crosses
//! this seam mid-iteration), and their read failures propagate to the scan
//! verbatim.

use eyre::{ensure, Result};

use super::{NO_PAGE, PAGE_SIZE};

pub trait ChunkSource {
    /// Fetches the bytes of page `page_no`. Page numbers start at 1;
    /// [`NO_PAGE`] is never a valid argument.
    fn fetch(&self, page_no: u32) -> Result<&[u8]>;
}

/// In-process page storage backed by a `Vec` of page buffers.
#[derive(Debug, Default)]
pub struct MemorySource {
    pages: Vec<Box<[u8]>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self { pages: Vec::new() }
    }

    /// Adds a page and returns its page number.
    pub fn push_page(&mut self, page: Box<[u8]>) -> Result<u32> {
        ensure!(
            page.len() == PAGE_SIZE,
            "invalid page size: {} != {}",
            page.len(),
            PAGE_SIZE
        );
        self.pages.push(page);
        Ok(self.pages.len() as u32)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

impl ChunkSource for MemorySource {
    fn fetch(&self, page_no: u32) -> Result<&[u8]> {
        ensure!(page_no != NO_PAGE, "page number 0 is reserved");
        self.pages
            .get(page_no as usize - 1)
            .map(|p| p.as_ref())
            .ok_or_else(|| eyre::eyre!("page {} not found", page_no))
    }
}
