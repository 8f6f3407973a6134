use std::path::{Path, PathBuf};

/// One line of `mount` output: `<source> on <mount path> ...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountEntry {
    pub source: String,
    pub mount_point: PathBuf,
}

impl MountEntry {
    /// Volume label as seen by the host, i.e. the last component of the mount path.
    pub fn label(&self) -> Option<&str> {
        self.mount_point.file_name().and_then(|name| name.to_str())
    }

    pub fn ends_with_label(&self, label: &str) -> bool {
        self.mount_point.to_string_lossy().ends_with(label)
    }
}

pub fn parse_mount_output(output: &[u8]) -> Vec<MountEntry> {
    let text = String::from_utf8_lossy(output);
    let mut entries = Vec::new();
    for line in text.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 3 {
            continue;
        }
        entries.push(MountEntry {
            source: fields[0].to_string(),
            mount_point: Path::new(fields[2]).to_path_buf(),
        });
    }
    entries
}

/// Last entry whose mount path ends with `label`.
pub fn find_labelled_mount<'a>(
    entries: &'a [MountEntry],
    label: &str,
) -> Option<&'a MountEntry> {
    entries.iter().rev().find(|entry| entry.ends_with_label(label))
}
