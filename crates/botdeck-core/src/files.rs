//! Workspace file tree types and media classification

use serde::{Deserialize, Serialize};

/// Kind of a tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    File,
    Directory,
}

/// One node of a bot's workspace file tree.
///
/// `path` is the unique, stable key: expansion and selection state are
/// keyed by it, never by render position, so a wholesale tree refetch
/// preserves what the user had open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileNode {
    pub path: String,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    #[serde(default)]
    pub children: Vec<FileNode>,
}

impl FileNode {
    pub fn is_dir(&self) -> bool {
        self.node_type == NodeType::Directory
    }
}

/// How the editor pane treats an opened file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaKind {
    #[default]
    Text,
    Image,
    Video,
    Audio,
}

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp", "ico", "svg"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "mov", "avi", "mkv"];
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "flac", "m4a"];

impl MediaKind {
    /// Classify by file extension. Deliberately not content sniffing:
    /// classification must match what the tree shows, and the tree only
    /// knows names.
    pub fn from_path(path: &str) -> Self {
        let ext = path
            .rsplit_once('.')
            .map(|(_, e)| e.to_ascii_lowercase())
            .unwrap_or_default();
        if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            MediaKind::Image
        } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            MediaKind::Video
        } else if AUDIO_EXTENSIONS.contains(&ext.as_str()) {
            MediaKind::Audio
        } else {
            MediaKind::Text
        }
    }

    /// Whether the file's payload is fetched base64-encoded
    pub fn is_binary(&self) -> bool {
        !matches!(self, MediaKind::Text)
    }

    pub fn label(&self) -> &'static str {
        match self {
            MediaKind::Text => "text",
            MediaKind::Image => "image",
            MediaKind::Video => "video",
            MediaKind::Audio => "audio",
        }
    }
}
