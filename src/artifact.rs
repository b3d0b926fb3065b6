// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Persists rendered badges to disk.

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};

use tracing::info;

use crate::error::{self, Error};

/// Writes `svg` to `path`, creating missing parent directories.
///
/// # Errors
///
/// Returns [`Error::BadgeIo`] when a directory or the file cannot be
/// created or written.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
///
/// use readme_stats::write_badge;
///
/// # fn main() -> Result<(), readme_stats::Error> {
/// write_badge(Path::new("badges/stats.svg",), "<svg/>",)?;
/// # Ok(())
/// # }
/// ```
pub fn write_badge(path: &Path, svg: &str,) -> Result<(), Error,>
{
    if let Some(parent,) = path.parent().filter(|parent| !parent.as_os_str().is_empty(),) {
        fs::create_dir_all(parent,).map_err(|source| error::badge_io_error(parent, source,),)?;
    }

    let file = File::create(path,).map_err(|source| error::badge_io_error(path, source,),)?;
    let mut writer = BufWriter::new(file,);
    writer.write_all(svg.as_bytes(),).map_err(|source| error::badge_io_error(path, source,),)?;
    writer.flush().map_err(|source| error::badge_io_error(path, source,),)?;

    info!(path = %path.display(), bytes = svg.len(), "Badge written");
    Ok((),)
}
