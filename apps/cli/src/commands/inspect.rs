use crate::error::CliError;
use crate::output::write_metainfo;

use client_core::MetaInfo;

use std::io::Write;
use std::path::Path;

use log::info;

pub fn run(file: &Path, out: &mut impl Write) -> Result<(), CliError> {
    let metainfo = MetaInfo::from_path(file)?;
    info!("Decoded {} ({})", file.display(), metainfo.info_hash_hex());
    write_metainfo(out, &metainfo)?;
    Ok(())
}
