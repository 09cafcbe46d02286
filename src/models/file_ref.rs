//! 文件引用：完整路径 + 显示名

use compact_str::CompactString;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileRef {
    full_path: PathBuf,
    name: CompactString,
}

impl FileRef {
    pub fn new(full_path: impl Into<PathBuf>) -> Self {
        let full_path = full_path.into();
        let name = full_path
            .file_name()
            .map(|n| CompactString::from(n.to_string_lossy().as_ref()))
            .unwrap_or_else(|| CompactString::from(full_path.to_string_lossy().as_ref()));
        Self { full_path, name }
    }

    pub fn full_path(&self) -> &Path {
        &self.full_path
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// 相对项目根目录的展示路径；根目录之外的文件退回完整路径
pub fn project_relative(root: &Path, path: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(rel) => rel.to_string_lossy().into_owned(),
        Err(_) => path.to_string_lossy().into_owned(),
    }
}

/// 从 `from` 所在目录指向 `to` 的相对引用（"../lib/util.rs" 之类）
pub fn relative_reference(from: &Path, to: &Path) -> String {
    let from_dir: Vec<Component> = match from.parent() {
        Some(dir) => dir.components().collect(),
        None => Vec::new(),
    };
    let to_comps: Vec<Component> = to.components().collect();

    let common = from_dir
        .iter()
        .zip(to_comps.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut out = PathBuf::new();
    for _ in common..from_dir.len() {
        out.push("..");
    }
    for comp in &to_comps[common..] {
        out.push(comp.as_os_str());
    }

    if out.as_os_str().is_empty() {
        return to.to_string_lossy().into_owned();
    }
    out.to_string_lossy().into_owned()
}
