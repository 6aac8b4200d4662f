use std::{
    fs::File,
    io::{self, Write},
    path::{Path, PathBuf},
};

#[cfg(unix)]
fn sync_parent(dir: &Path) -> io::Result<()> {
    File::open(dir)?.sync_all()
}

// Directory handles cannot be fsynced on Windows; the rename is as durable as it gets there.
#[cfg(not(unix))]
fn sync_parent(_dir: &Path) -> io::Result<()> {
    Ok(())
}

fn staging_path(dest: &Path, parent: &Path) -> io::Result<PathBuf> {
    let file_name = dest
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no filename"))?;
    Ok(parent.join(format!(
        ".{}.{}.tmp",
        file_name.to_string_lossy(),
        uuid::Uuid::new_v4().simple()
    )))
}

pub fn write_atomic(dest: &Path, bytes: &[u8]) -> io::Result<()> {
    let parent = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let staging = staging_path(dest, parent)?;
    let written = File::create(&staging).and_then(|mut f| {
        f.write_all(bytes)?;
        f.sync_all()
    });
    if let Err(e) = written.and_then(|_| std::fs::rename(&staging, dest)) {
        let _ = std::fs::remove_file(&staging);
        return Err(e);
    }

    sync_parent(parent)
}
