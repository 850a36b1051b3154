//! Low-level load-command stream walking.
//!
//! A Mach-O slice header is followed by `ncmds` back-to-back load
//! commands occupying `sizeofcmds` bytes. Each command is a
//! variable-length record that begins with a fixed 8-byte prefix:
//!
//! - `cmd: u32` — the command tag
//! - `cmdsize: u32` — total record length, prefix included
//!
//! Only three command families matter here; everything else is skipped
//! by advancing the cursor by `cmdsize`:
//!
//! - `LC_LOAD_DYLIB` / `LC_LOAD_WEAK_DYLIB`: a linked library
//! - `LC_ID_DYLIB`: the slice's own install name (dylibs only)
//! - `LC_RPATH`: a runtime search path
//!
//! All three embed their string as an `lc_str`: a u32 offset from the
//! record start to a NUL-terminated byte string inside the record.

use byteorder::{ByteOrder, NativeEndian};
use tracing::trace;

/// LC_LOAD_DYLIB — load a dynamically linked shared library
pub const LC_LOAD_DYLIB: u32 = 0x0000_000c;
/// LC_ID_DYLIB — the install name of a dynamically linked shared library
pub const LC_ID_DYLIB: u32 = 0x0000_000d;
/// Flag marking commands dyld must understand
pub const LC_REQ_DYLD: u32 = 0x8000_0000;
/// LC_LOAD_WEAK_DYLIB — load a library that may be missing at runtime
pub const LC_LOAD_WEAK_DYLIB: u32 = 0x18 | LC_REQ_DYLD;
/// LC_RPATH — a runpath addition for `@rpath` expansion
pub const LC_RPATH: u32 = 0x1c | LC_REQ_DYLD;

/// Size of the fixed `cmd`/`cmdsize` prefix every record begins with
pub const COMMAND_PREFIX_LEN: usize = 8;

// The lc_str offset field sits immediately after the prefix in both
// dylib_command and rpath_command.
const LC_STR_FIELD: usize = COMMAND_PREFIX_LEN;

/// Facts accumulated from one slice's load-command stream
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandFacts {
    /// Install name from the last `LC_ID_DYLIB` seen, if any
    pub dylib_id: Option<String>,
    /// Linked libraries, in command-stream order, duplicates preserved
    pub dependencies: Vec<String>,
    /// Runtime search paths, in command-stream order
    pub rpaths: Vec<String>,
}

/// Walks a load-command buffer and collects dependency, rpath and
/// install-name facts.
///
/// Iteration ends after `ncmds` records, or earlier if fewer bytes remain
/// than a record prefix or a record declares a size its prefix cannot
/// cover. A truncated stream is not an error; whatever was fully read
/// before the cut still counts.
pub fn walk_commands(buf: &[u8], ncmds: u32) -> CommandFacts {
    let mut facts = CommandFacts::default();
    let mut cursor = 0usize;

    for i in 0..ncmds {
        if cursor + COMMAND_PREFIX_LEN > buf.len() {
            trace!("command stream truncated at record {} (offset {})", i, cursor);
            break;
        }

        let cmd = NativeEndian::read_u32(&buf[cursor..cursor + 4]);
        let cmdsize = NativeEndian::read_u32(&buf[cursor + 4..cursor + 8]) as usize;

        if cmdsize < COMMAND_PREFIX_LEN {
            // The cursor cannot advance past a record smaller than its
            // own prefix.
            trace!("record {} declares cmdsize {} (< prefix), stopping", i, cmdsize);
            break;
        }

        // Clamp the record view to the buffer; the embedded string must
        // never be read past cmdsize nor past end-of-buffer.
        let end = (cursor + cmdsize).min(buf.len());
        let record = &buf[cursor..end];

        match cmd {
            LC_LOAD_DYLIB | LC_LOAD_WEAK_DYLIB => {
                if let Some(name) = embedded_string(record) {
                    facts.dependencies.push(name);
                }
            }
            LC_ID_DYLIB => {
                // Well-formed dylibs declare exactly one id; if more
                // appear, the last one wins.
                if let Some(name) = embedded_string(record) {
                    facts.dylib_id = Some(name);
                }
            }
            LC_RPATH => {
                if let Some(path) = embedded_string(record) {
                    facts.rpaths.push(path);
                }
            }
            other => {
                trace!("skipping load command {:#010x} ({} bytes)", other, cmdsize);
            }
        }

        cursor += cmdsize;
    }

    facts
}

/// Extracts the `lc_str` payload of a dylib or rpath record.
///
/// Returns `None` when the record is too short to hold the offset field
/// or the declared offset points outside the record.
fn embedded_string(record: &[u8]) -> Option<String> {
    if record.len() < LC_STR_FIELD + 4 {
        return None;
    }

    let offset = NativeEndian::read_u32(&record[LC_STR_FIELD..LC_STR_FIELD + 4]) as usize;
    if offset >= record.len() {
        return None;
    }

    let tail = &record[offset..];
    let len = tail.iter().position(|&b| b == 0).unwrap_or(tail.len());
    Some(String::from_utf8_lossy(&tail[..len]).into_owned())
}
