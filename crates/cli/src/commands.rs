use std::fs;
use std::path::{Path, PathBuf};

use delta::Operation;

use crate::error::CliError;
use crate::format::{self, OutputFormat};

fn logical_name(file: &Path) -> String {
    file.to_string_lossy().into_owned()
}

/// `fiver track <file> [--message <msg>]`
pub fn track(storage: &Path, file: &Path, message: Option<&str>) -> Result<(), CliError> {
    let bytes = fs::read(file)?;
    let name = logical_name(file);
    let version = store::append(storage, &name, &bytes, message, true)?;
    println!("tracked {} as version {version}", file.display());
    Ok(())
}

/// `fiver restore <file> --version <v> [--output <path>]`
pub fn restore(
    storage: &Path,
    file: &Path,
    version: u32,
    output: Option<PathBuf>,
) -> Result<(), CliError> {
    let name = logical_name(file);
    let bytes = store::reconstruct(storage, &name, version)?;
    let output = output.unwrap_or_else(|| {
        let mut p = file.to_path_buf();
        let file_name = format!(
            "{}.v{version}",
            p.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default()
        );
        p.set_file_name(file_name);
        p
    });
    fs::write(&output, &bytes)?;
    println!("restored version {version} of {} to {}", file.display(), output.display());
    Ok(())
}

/// `fiver diff <file> --version <v> [--format ...]`
pub fn diff(storage: &Path, file: &Path, version: u32, format: OutputFormat) -> Result<(), CliError> {
    let name = logical_name(file);
    let (base_size, stream) = store::load_stream(storage, &name, version)?;
    let copies = stream
        .operations()
        .iter()
        .filter(|op| matches!(op, Operation::Copy { .. }))
        .count();
    let inserts = stream.operations().len() - copies;
    let target_size = stream.target_size();
    let ratio = if target_size == 0 {
        0.0
    } else {
        1.0 - (f64::from(stream.literal_bytes()) / f64::from(target_size))
    };

    match format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "version": version,
                "base_size": base_size,
                "target_size": target_size,
                "copy_ops": copies,
                "insert_ops": inserts,
                "literal_bytes": stream.literal_bytes(),
                "reuse_ratio": ratio,
            });
            println!("{}", serde_json::to_string_pretty(&value).unwrap());
        }
        OutputFormat::Brief => {
            println!("v{version}: {copies} copy, {inserts} insert, {:.1}% reused", ratio * 100.0);
        }
        OutputFormat::Table => {
            println!("version        {version}");
            println!("base_size      {base_size}");
            println!("target_size    {target_size}");
            println!("copy ops       {copies}");
            println!("insert ops     {inserts}");
            println!("literal bytes  {}", stream.literal_bytes());
            println!("reuse ratio    {:.1}%", ratio * 100.0);
        }
    }
    Ok(())
}

/// `fiver history <file> [--format ...] [--limit N]`
pub fn history(
    storage: &Path,
    file: &Path,
    format: OutputFormat,
    limit: Option<usize>,
) -> Result<(), CliError> {
    let name = logical_name(file);
    let versions = store::enumerate(storage, &name)?;
    let versions: Vec<u32> = match limit {
        Some(n) if n < versions.len() => versions[versions.len() - n..].to_vec(),
        _ => versions,
    };
    let mut entries = Vec::with_capacity(versions.len());
    for v in versions {
        entries.push(store::read_metadata(storage, &name, v)?);
    }
    println!("{}", format::render_history(format, &entries));
    Ok(())
}

/// `fiver list [--format ...]`
pub fn list(storage: &Path, format: OutputFormat) -> Result<(), CliError> {
    let mut rows = Vec::new();
    for name in store::names(storage)? {
        let versions = store::enumerate(storage, &name)?;
        rows.push((name, versions));
    }
    println!("{}", format::render_list(format, &rows));
    Ok(())
}

/// `fiver status <file> [--json]`
pub fn status(storage: &Path, file: &Path, json: bool) -> Result<(), CliError> {
    let name = logical_name(file);
    let versions = store::enumerate(storage, &name)?;
    let Some(&latest) = versions.last() else {
        return Err(CliError::InvalidUsage(format!(
            "{} is not tracked",
            file.display()
        )));
    };
    let meta = store::read_metadata(storage, &name, latest)?;
    let exists = file.exists();
    let unchanged = exists
        && fs::read(file)
            .map(|bytes| store::checksum(&bytes) == meta.checksum)
            .unwrap_or(false);

    if json {
        let value = serde_json::json!({
            "name": name,
            "latest_version": latest,
            "version_count": versions.len(),
            "working_file_exists": exists,
            "unchanged_since_latest": unchanged,
            "message": meta.message,
            "timestamp": meta.timestamp,
        });
        println!("{}", serde_json::to_string_pretty(&value).unwrap());
    } else {
        println!("{}: {} version(s), latest v{latest}", name, versions.len());
        println!("working file exists: {exists}");
        if exists {
            println!("unchanged since latest: {unchanged}");
        }
    }
    Ok(())
}

/// `fiver delete <file> --version <v>`
pub fn delete(storage: &Path, file: &Path, version: u32) -> Result<(), CliError> {
    let name = logical_name(file);
    store::delete_version(storage, &name, version)?;
    println!("deleted version {version} of {}", file.display());
    Ok(())
}
