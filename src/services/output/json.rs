use std::io::{self, Write};

use crate::models::Analysis;

pub fn write<W: Write>(writer: &mut W, analysis: &Analysis) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, analysis)?;
    writeln!(writer)
}
