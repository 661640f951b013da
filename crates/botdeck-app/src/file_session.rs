//! The currently open file: editor buffer or media preview
//!
//! Binary files are previewed through a scratch file on disk holding the
//! decoded payload, so an external viewer can be pointed at it. That
//! scratch file is the one resource in the engine with an explicit
//! acquire/release discipline: **at most one may be live at any time**,
//! and opening a new file or closing the session releases the previous
//! one before the next is created. The model counts acquisitions and
//! releases so the balance is checkable.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use botdeck_core::prelude::*;
use botdeck_core::MediaKind;

use crate::editor::EditorBuffer;

/// A live scratch file holding decoded media bytes.
///
/// The underlying file is removed when the preview is dropped; the
/// session releases it explicitly so the drop point is deterministic.
#[derive(Debug)]
pub struct MediaPreview {
    file: NamedTempFile,
    kind: MediaKind,
}

impl MediaPreview {
    fn create(path: &str, kind: MediaKind, bytes: &[u8]) -> Result<Self> {
        let suffix = path
            .rsplit_once('.')
            .map(|(_, ext)| format!(".{ext}"))
            .unwrap_or_default();
        let mut file = tempfile::Builder::new()
            .prefix("botdeck-preview-")
            .suffix(&suffix)
            .tempfile()
            .map_err(|e| Error::preview(format!("cannot create scratch file: {e}")))?;
        file.write_all(bytes)
            .map_err(|e| Error::preview(format!("cannot write scratch file: {e}")))?;
        Ok(Self { file, kind })
    }

    /// Location an external viewer can be pointed at
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }
}

/// What the open file holds
#[derive(Debug)]
pub enum OpenContent {
    Text(EditorBuffer),
    Media(MediaPreview),
}

/// The file currently open in the editor pane
#[derive(Debug)]
pub struct OpenFile {
    pub path: String,
    pub kind: MediaKind,
    pub content: OpenContent,
}

/// Tracks the open-file session and owns the preview lifecycle
#[derive(Debug, Default)]
pub struct FileSession {
    open: Option<OpenFile>,
    previews_created: u64,
    previews_released: u64,
}

impl FileSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_file(&self) -> Option<&OpenFile> {
        self.open.as_ref()
    }

    pub fn open_path(&self) -> Option<&str> {
        self.open.as_ref().map(|f| f.path.as_str())
    }

    pub fn editor(&self) -> Option<&EditorBuffer> {
        match self.open.as_ref()?.content {
            OpenContent::Text(ref buffer) => Some(buffer),
            OpenContent::Media(_) => None,
        }
    }

    pub fn editor_mut(&mut self) -> Option<&mut EditorBuffer> {
        match self.open.as_mut()?.content {
            OpenContent::Text(ref mut buffer) => Some(buffer),
            OpenContent::Media(_) => None,
        }
    }

    pub fn preview(&self) -> Option<&MediaPreview> {
        match self.open.as_ref()?.content {
            OpenContent::Media(ref preview) => Some(preview),
            OpenContent::Text(_) => None,
        }
    }

    /// Open a text file, replacing whatever was open. Any prior media
    /// preview is released first.
    pub fn open_text(&mut self, path: impl Into<String>, content: &str) {
        self.release_preview();
        self.open = Some(OpenFile {
            path: path.into(),
            kind: MediaKind::Text,
            content: OpenContent::Text(EditorBuffer::from_content(content)),
        });
    }

    /// Open a binary file as a media preview. The previous preview is
    /// released *before* the new scratch file is created, so at no point
    /// do two live previews exist.
    pub fn open_media(
        &mut self,
        path: impl Into<String>,
        kind: MediaKind,
        bytes: &[u8],
    ) -> Result<()> {
        self.release_preview();
        let path = path.into();
        let preview = MediaPreview::create(&path, kind, bytes)?;
        self.previews_created += 1;
        self.open = Some(OpenFile {
            path,
            kind,
            content: OpenContent::Media(preview),
        });
        Ok(())
    }

    /// Close the session, releasing any preview and dropping the buffer
    pub fn close(&mut self) {
        self.release_preview();
        self.open = None;
    }

    /// Confirmed save for `path`: clears the dirty flag and nothing else.
    /// A save confirmation for a file that is no longer open is ignored.
    pub fn mark_saved(&mut self, path: &str) {
        if let Some(open) = self.open.as_mut() {
            if open.path == path {
                if let OpenContent::Text(ref mut buffer) = open.content {
                    buffer.mark_saved();
                }
            }
        }
    }

    /// Whether `path` is the file currently open
    pub fn is_open(&self, path: &str) -> bool {
        self.open_path() == Some(path)
    }

    /// Previews created minus previews released; 0 or 1 by invariant
    pub fn live_previews(&self) -> u64 {
        self.previews_created - self.previews_released
    }

    pub fn previews_created(&self) -> u64 {
        self.previews_created
    }

    pub fn previews_released(&self) -> u64 {
        self.previews_released
    }

    fn release_preview(&mut self) {
        if let Some(OpenFile {
            content: OpenContent::Media(_),
            ..
        }) = self.open
        {
            // Dropping the NamedTempFile removes the scratch file
            self.open = None;
            self.previews_released += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_text_session() {
        let mut session = FileSession::new();
        session.open_text("index.js", "console.log(1)");
        assert!(session.is_open("index.js"));
        assert_eq!(session.editor().unwrap().content(), "console.log(1)");
        assert!(session.preview().is_none());
        assert_eq!(session.live_previews(), 0);
    }

    #[test]
    fn test_open_media_creates_scratch_file() {
        let mut session = FileSession::new();
        session
            .open_media("logo.png", MediaKind::Image, b"\x89PNG")
            .unwrap();

        let preview = session.preview().unwrap();
        assert_eq!(preview.kind(), MediaKind::Image);
        assert!(preview.path().exists());
        assert_eq!(std::fs::read(preview.path()).unwrap(), b"\x89PNG");
        assert_eq!(session.live_previews(), 1);
    }

    #[test]
    fn test_opening_second_media_releases_first() {
        let mut session = FileSession::new();
        session
            .open_media("a.png", MediaKind::Image, b"aaaa")
            .unwrap();
        let first_path = session.preview().unwrap().path().to_path_buf();

        session
            .open_media("b.mp4", MediaKind::Video, b"bbbb")
            .unwrap();

        assert!(!first_path.exists(), "first scratch file must be removed");
        assert_eq!(session.previews_created(), 2);
        assert_eq!(session.previews_released(), 1);
        assert_eq!(session.live_previews(), 1);
        assert!(session.is_open("b.mp4"));
    }

    #[test]
    fn test_close_releases_preview() {
        let mut session = FileSession::new();
        session
            .open_media("a.png", MediaKind::Image, b"aaaa")
            .unwrap();
        let scratch = session.preview().unwrap().path().to_path_buf();

        session.close();

        assert!(!scratch.exists());
        assert_eq!(session.live_previews(), 0);
        assert!(session.open_file().is_none());
    }

    #[test]
    fn test_text_after_media_releases_preview() {
        let mut session = FileSession::new();
        session
            .open_media("a.png", MediaKind::Image, b"aaaa")
            .unwrap();
        session.open_text("index.js", "x");

        assert_eq!(session.live_previews(), 0);
        assert!(session.editor().is_some());
    }

    #[test]
    fn test_close_on_text_session_is_clean() {
        let mut session = FileSession::new();
        session.open_text("index.js", "x");
        session.close();
        assert!(session.open_file().is_none());
        assert_eq!(session.previews_released(), 0);
    }

    #[test]
    fn test_mark_saved_clears_dirty_for_open_path_only() {
        let mut session = FileSession::new();
        session.open_text("index.js", "x");
        session.editor_mut().unwrap().insert_char('!');
        assert!(session.editor().unwrap().is_dirty());

        // Confirmation for a different (stale) path is ignored
        session.mark_saved("other.js");
        assert!(session.editor().unwrap().is_dirty());

        session.mark_saved("index.js");
        assert!(!session.editor().unwrap().is_dirty());
    }

    #[test]
    fn test_scratch_file_keeps_extension() {
        let mut session = FileSession::new();
        session
            .open_media("clips/intro.mp4", MediaKind::Video, b"vvvv")
            .unwrap();
        let path = session.preview().unwrap().path().to_path_buf();
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("mp4"));
    }
}
