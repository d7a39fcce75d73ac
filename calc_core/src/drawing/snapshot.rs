//! Exported images of the drawing surface.

use std::sync::Arc;

use base64::Engine;

use crate::units::PhysicalSize;

/// MIME type of every snapshot
pub const PNG_MIME: &str = "image/png";

/// Immutable PNG image of the canvas. Clones share the encoded bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanvasSnapshot {
    png: Arc<[u8]>,
    size: PhysicalSize,
}

impl CanvasSnapshot {
    pub fn new(png: Vec<u8>, size: PhysicalSize) -> Self {
        CanvasSnapshot {
            png: png.into(),
            size,
        }
    }

    pub fn png_bytes(&self) -> &[u8] {
        &self.png
    }

    /// Physical pixel dimensions
    pub fn size(&self) -> PhysicalSize {
        self.size
    }

    /// Bare base64 payload, as sent in an `inlineData` part
    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.png)
    }

    /// `data:image/png;base64,...`
    pub fn to_data_url(&self) -> String {
        format!("data:{PNG_MIME};base64,{}", self.to_base64())
    }
}

/// What a surface operation did to the exported image
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotUpdate {
    /// New image available
    Snapshot(CanvasSnapshot),
    /// Canvas was cleared; there is no image to send
    Cleared,
}

impl SnapshotUpdate {
    pub fn into_snapshot(self) -> Option<CanvasSnapshot> {
        match self {
            SnapshotUpdate::Snapshot(snapshot) => Some(snapshot),
            SnapshotUpdate::Cleared => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_url() {
        let snapshot = CanvasSnapshot::new(vec![1, 2, 3], PhysicalSize { width: 1, height: 1 });
        assert_eq!(snapshot.to_base64(), "AQID");
        assert_eq!(snapshot.to_data_url(), "data:image/png;base64,AQID");
    }

    #[test]
    fn test_clones_share_bytes() {
        let a = CanvasSnapshot::new(vec![0; 64], PhysicalSize { width: 4, height: 4 });
        let b = a.clone();
        assert!(std::ptr::eq(a.png_bytes(), b.png_bytes()));
    }

    #[test]
    fn test_cleared_has_no_image() {
        assert_eq!(SnapshotUpdate::Cleared.into_snapshot(), None);
    }
}
