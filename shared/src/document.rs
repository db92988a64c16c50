use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geometry::PageSize;

pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// A file picked by the user, as declared by the host (name, media type, body).
#[derive(Clone, Debug, PartialEq)]
pub struct DocumentFile {
    pub name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl DocumentFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    pub fn is_pdf(&self) -> bool {
        self.media_type == PDF_MEDIA_TYPE
    }

    pub fn info(&self) -> DocumentInfo {
        DocumentInfo::new(&self.name, self.bytes.len() as u64, &self.media_type)
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// 1-indexed.
    pub page_number: u32,
    pub width: f64,
    pub height: f64,
}

impl PageInfo {
    pub fn size(&self) -> Option<PageSize> {
        PageSize::new(self.width, self.height)
    }
}

/// Metadata of the loaded document. The id doubles as the `documentId`
/// stamped on every annotation drawn on it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentInfo {
    pub id: String,
    pub filename: String,
    pub file_size: u64,
    pub mime_type: String,
    pub total_pages: u32,
    pub pages: Vec<PageInfo>,
    pub uploaded_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl DocumentInfo {
    pub fn new(filename: &str, file_size: u64, mime_type: &str) -> Self {
        Self {
            id: filename.to_string(),
            filename: filename.to_string(),
            file_size,
            mime_type: mime_type.to_string(),
            total_pages: 0,
            pages: Vec::new(),
            uploaded_at: Utc::now(),
            user_id: None,
        }
    }

    pub fn page(&self, page_number: u32) -> Option<&PageInfo> {
        self.pages
            .iter()
            .find(|page| page.page_number == page_number)
    }

    /// Records the rendered size of a page, replacing any earlier report.
    pub fn set_page_size(&mut self, page_number: u32, size: PageSize) {
        let info = PageInfo {
            page_number,
            width: size.width(),
            height: size.height(),
        };
        match self
            .pages
            .iter_mut()
            .find(|page| page.page_number == page_number)
        {
            Some(existing) => *existing = info,
            None => self.pages.push(info),
        }
    }
}
