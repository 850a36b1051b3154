//! Mach-O container decoding.
//!
//! This module locates the architecture slices inside a Mach-O input
//! (thin or fat/universal) and decodes each slice's load-command stream
//! into a [`SliceReport`].
//!
//! ## Algorithm Overview
//!
//! 1. Classify the input by its leading 4-byte magic number
//! 2. Thin input: the single slice starts at offset 0
//! 3. Fat input: walk the architecture descriptor table to find each
//!    nested slice's cpu type and file offset
//! 4. Per slice: read the 28- or 32-byte header, then walk `ncmds`
//!    load commands to collect linked libraries, rpaths and the
//!    install name
//!
//! Decoding never executes or links the binary; it only reads declared
//! header fields and bounds-checks every record against the buffer it
//! was read into.

mod commands;

use crate::arch::arch_name;
use crate::error::{Error, Result};
use byteorder::{NativeEndian, ReadBytesExt};
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;
use tracing::{debug, warn};

pub use commands::{
    walk_commands, CommandFacts, COMMAND_PREFIX_LEN, LC_ID_DYLIB, LC_LOAD_DYLIB,
    LC_LOAD_WEAK_DYLIB, LC_REQ_DYLD, LC_RPATH,
};

/// Thin Mach-O, 32-bit, native byte order
pub const MH_MAGIC: u32 = 0xfeed_face;
/// Thin Mach-O, 64-bit, native byte order
pub const MH_MAGIC_64: u32 = 0xfeed_facf;
/// Thin Mach-O, 32-bit, reversed byte order
pub const MH_CIGAM: u32 = 0xcefa_edfe;
/// Thin Mach-O, 64-bit, reversed byte order
pub const MH_CIGAM_64: u32 = 0xcffa_edfe;

/// Fat container with 32-bit descriptors
pub const FAT_MAGIC: u32 = 0xcafe_babe;
/// Fat container with 64-bit descriptors
pub const FAT_MAGIC_64: u32 = 0xcafe_babf;
/// Fat container with 32-bit descriptors, reversed byte order
pub const FAT_CIGAM: u32 = 0xbeba_feca;
/// Fat container with 64-bit descriptors, reversed byte order
pub const FAT_CIGAM_64: u32 = 0xbfba_feca;

/// Size of the fat_header that precedes the descriptor table
const FAT_HEADER_LEN: u64 = 8;

/// One architecture slice located inside a container.
///
/// Produced by [`Inspector::locate`] and consumed immediately by the
/// decoder; not retained in results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchSlice {
    /// Resolved architecture name, e.g. `x86_64`
    pub arch: String,
    /// Byte offset of the slice header within the input
    pub offset: u64,
    /// Whether the slice carries the wider 64-bit header layout
    pub is_64bit: bool,
}

/// The decoded facts of one architecture slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceReport {
    /// Architecture name resolved from the slice header
    pub arch: String,
    /// Install name from the slice's `LC_ID_DYLIB`, if it is a dylib
    pub dylib_id: Option<String>,
    /// Linked libraries in command-stream order, duplicates preserved
    pub dependencies: Vec<String>,
    /// Runtime search paths in command-stream order
    pub rpaths: Vec<String>,
}

/// Configuration for the inspector
#[derive(Debug, Clone)]
pub struct InspectorConfig {
    /// Upper bound on how many load-command bytes to buffer per slice.
    /// `sizeofcmds` is attacker-controlled; this caps the allocation even
    /// when the input file itself is large.
    pub max_command_bytes: usize,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            max_command_bytes: 16 * 1024 * 1024, // 16 MB
        }
    }
}

impl InspectorConfig {
    /// Creates a new inspector config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the per-slice load-command buffer cap
    pub fn max_command_bytes(mut self, max: usize) -> Self {
        self.max_command_bytes = max;
        self
    }
}

/// The two thin-header layouts, selected per slice by its magic number.
///
/// They differ only in a trailing `reserved` word present in the 64-bit
/// layout; the layout is data discovered at runtime, not a type
/// parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeaderLayout {
    Mach32,
    Mach64,
}

impl HeaderLayout {
    fn for_slice(is_64bit: bool) -> Self {
        if is_64bit {
            Self::Mach64
        } else {
            Self::Mach32
        }
    }

    fn byte_len(self) -> u64 {
        match self {
            Self::Mach32 => 28,
            Self::Mach64 => 32,
        }
    }

    /// Reads the fixed slice header. All fields are in native byte order.
    fn read_header<R: Read>(self, input: &mut R) -> std::io::Result<SliceHeader> {
        let _magic = input.read_u32::<NativeEndian>()?;
        let cputype = input.read_u32::<NativeEndian>()?;
        let cpusubtype = input.read_u32::<NativeEndian>()?;
        let _filetype = input.read_u32::<NativeEndian>()?;
        let ncmds = input.read_u32::<NativeEndian>()?;
        let sizeofcmds = input.read_u32::<NativeEndian>()?;
        let _flags = input.read_u32::<NativeEndian>()?;
        if self == Self::Mach64 {
            let _reserved = input.read_u32::<NativeEndian>()?;
        }
        Ok(SliceHeader {
            cputype,
            cpusubtype,
            ncmds,
            sizeofcmds,
        })
    }
}

/// The fields of a slice header the decoder actually uses
#[derive(Debug, Clone, Copy)]
struct SliceHeader {
    cputype: u32,
    cpusubtype: u32,
    ncmds: u32,
    sizeofcmds: u32,
}

/// The two fat-descriptor layouts, selected by the container magic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FatLayout {
    Fat32,
    Fat64,
}

impl FatLayout {
    fn descriptor_len(self) -> u64 {
        match self {
            Self::Fat32 => 20,
            Self::Fat64 => 32,
        }
    }

    /// Reads one architecture descriptor. The fat table is stored in the
    /// reverse of native byte order regardless of which magic variant
    /// matched, so every field is byte-swapped after the native read.
    fn read_descriptor<R: Read>(self, input: &mut R) -> std::io::Result<FatDescriptor> {
        let cputype = input.read_u32::<NativeEndian>()?.swap_bytes();
        let cpusubtype = input.read_u32::<NativeEndian>()?.swap_bytes();
        let offset = match self {
            Self::Fat32 => u64::from(input.read_u32::<NativeEndian>()?.swap_bytes()),
            Self::Fat64 => input.read_u64::<NativeEndian>()?.swap_bytes(),
        };
        // size, align and (for fat_arch_64) reserved are not needed;
        // the next descriptor is reached by an absolute seek.
        Ok(FatDescriptor {
            cputype,
            cpusubtype,
            offset,
        })
    }
}

#[derive(Debug, Clone, Copy)]
struct FatDescriptor {
    cputype: u32,
    cpusubtype: u32,
    offset: u64,
}

/// Decodes Mach-O containers into per-slice reports
#[derive(Debug, Clone)]
pub struct Inspector {
    config: InspectorConfig,
}

impl Default for Inspector {
    fn default() -> Self {
        Self::new()
    }
}

impl Inspector {
    /// Creates a new inspector with default configuration
    pub fn new() -> Self {
        Self {
            config: InspectorConfig::default(),
        }
    }

    /// Creates a new inspector with custom configuration
    pub fn with_config(config: InspectorConfig) -> Self {
        Self { config }
    }

    /// Decodes every architecture slice of the input.
    ///
    /// Returns one [`SliceReport`] per decodable slice, in the order the
    /// slices appear in the container. An input that is not a Mach-O
    /// container yields an empty result and one `warn!` diagnostic; a
    /// slice that fails to decode is skipped with a diagnostic and never
    /// prevents its siblings from decoding.
    pub fn inspect<R: Read + Seek>(&self, input: &mut R) -> Result<Vec<SliceReport>> {
        let slices = match self.locate(input) {
            Err(Error::UnrecognizedContainer { magic }) => {
                warn!("input is not a Mach-O container (magic {:#010x})", magic);
                return Ok(Vec::new());
            }
            other => other?,
        };

        debug!("located {} architecture slice(s)", slices.len());

        let mut reports = Vec::with_capacity(slices.len());
        for slice in &slices {
            if let Some(report) = self.decode_slice(input, slice) {
                reports.push(report);
            }
        }
        Ok(reports)
    }

    /// Locates the architecture slices of the input.
    ///
    /// Thin inputs produce exactly one slice at offset 0 (or none, when
    /// the header's cpu type resolves to no known architecture). Fat
    /// inputs produce one slice per resolvable descriptor, in table
    /// order.
    pub fn locate<R: Read + Seek>(&self, input: &mut R) -> Result<Vec<ArchSlice>> {
        input.seek(SeekFrom::Start(0))?;
        let magic = input.read_u32::<NativeEndian>()?;
        // Rewind: on the thin path the magic is re-read as the first
        // header field.
        input.seek(SeekFrom::Start(0))?;

        match magic {
            FAT_MAGIC | FAT_CIGAM => self.locate_fat(input, FatLayout::Fat32),
            FAT_MAGIC_64 | FAT_CIGAM_64 => self.locate_fat(input, FatLayout::Fat64),
            MH_MAGIC | MH_MAGIC_64 | MH_CIGAM | MH_CIGAM_64 => self.locate_thin(input, magic),
            other => Err(Error::unrecognized_container(other)),
        }
    }

    fn locate_thin<R: Read>(&self, input: &mut R, magic: u32) -> Result<Vec<ArchSlice>> {
        let is_64bit = magic == MH_MAGIC_64;
        let header = HeaderLayout::for_slice(is_64bit).read_header(input)?;

        match arch_name(header.cputype, header.cpusubtype) {
            Some(arch) => Ok(vec![ArchSlice {
                arch: arch.to_string(),
                offset: 0,
                is_64bit,
            }]),
            None => {
                warn!(
                    "{}",
                    Error::unknown_architecture(header.cputype, header.cpusubtype)
                );
                Ok(Vec::new())
            }
        }
    }

    fn locate_fat<R: Read + Seek>(&self, input: &mut R, layout: FatLayout) -> Result<Vec<ArchSlice>> {
        input.seek(SeekFrom::Start(4))?;
        let nfat_arch = input.read_u32::<NativeEndian>()?.swap_bytes();
        debug!("fat container with {} architecture descriptor(s)", nfat_arch);

        let mut slices = Vec::new();
        for i in 0..nfat_arch {
            input.seek(SeekFrom::Start(
                FAT_HEADER_LEN + u64::from(i) * layout.descriptor_len(),
            ))?;
            let desc = match layout.read_descriptor(input) {
                Ok(desc) => desc,
                Err(e) => {
                    warn!("fat descriptor {} unreadable, stopping table walk: {}", i, e);
                    break;
                }
            };

            let Some(arch) = arch_name(desc.cputype, desc.cpusubtype) else {
                warn!(
                    "fat descriptor {}: {}",
                    i,
                    Error::unknown_architecture(desc.cputype, desc.cpusubtype)
                );
                continue;
            };

            // Peek the nested slice's own magic to pick the header
            // layout. An unreadable offset still yields a slice; the
            // decoder fails that one slice when it reads there.
            let is_64bit = input
                .seek(SeekFrom::Start(desc.offset))
                .and_then(|_| input.read_u32::<NativeEndian>())
                .map(|m| m == MH_MAGIC_64)
                .unwrap_or(false);

            slices.push(ArchSlice {
                arch: arch.to_string(),
                offset: desc.offset,
                is_64bit,
            });
        }
        Ok(slices)
    }

    /// Decodes one located slice into a report.
    ///
    /// Returns `None` (with a `warn!` diagnostic) when the slice header
    /// cannot be read or its cpu type resolves to no architecture name.
    /// The header is the authoritative source for the report's `arch`,
    /// even though the locator already resolved a name for fat slices.
    pub fn decode_slice<R: Read + Seek>(
        &self,
        input: &mut R,
        slice: &ArchSlice,
    ) -> Option<SliceReport> {
        match self.try_decode_slice(input, slice) {
            Ok(report) => Some(report),
            Err(e) => {
                warn!(
                    "skipping slice '{}' at offset {:#x}: {}",
                    slice.arch, slice.offset, e
                );
                None
            }
        }
    }

    fn try_decode_slice<R: Read + Seek>(
        &self,
        input: &mut R,
        slice: &ArchSlice,
    ) -> Result<SliceReport> {
        let input_len = input.seek(SeekFrom::End(0))?;
        input.seek(SeekFrom::Start(slice.offset))?;

        let layout = HeaderLayout::for_slice(slice.is_64bit);
        let header = layout.read_header(input)?;

        let arch = arch_name(header.cputype, header.cpusubtype)
            .ok_or_else(|| Error::unknown_architecture(header.cputype, header.cpusubtype))?;

        // sizeofcmds is a declared field of untrusted input; clamp it
        // against what the input can actually provide before allocating.
        let commands_start = slice.offset + layout.byte_len();
        let available = input_len.saturating_sub(commands_start);
        let take = (header.sizeofcmds as u64)
            .min(available)
            .min(self.config.max_command_bytes as u64) as usize;

        let mut buf = vec![0u8; take];
        input.read_exact(&mut buf)?;

        let facts = walk_commands(&buf, header.ncmds);
        Ok(SliceReport {
            arch: arch.to_string(),
            dylib_id: facts.dylib_id,
            dependencies: facts.dependencies,
            rpaths: facts.rpaths,
        })
    }
}

/// Decodes a Mach-O file into per-slice reports.
///
/// This is a convenience function that opens the file and inspects it
/// with the default configuration.
pub fn inspect_file(path: impl AsRef<Path>) -> Result<Vec<SliceReport>> {
    let path = path.as_ref();
    let mut file = std::fs::File::open(path).map_err(|e| Error::file_read(path, e))?;
    Inspector::new().inspect(&mut file)
}

/// Decodes a Mach-O file with custom configuration
pub fn inspect_file_with_config(
    path: impl AsRef<Path>,
    config: InspectorConfig,
) -> Result<Vec<SliceReport>> {
    let path = path.as_ref();
    let mut file = std::fs::File::open(path).map_err(|e| Error::file_read(path, e))?;
    Inspector::with_config(config).inspect(&mut file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arch::{CPU_TYPE_ARM64, CPU_TYPE_X86_64};
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    const MH_DYLIB: u32 = 0x6;

    fn dylib_command(cmd: u32, name: &str) -> Vec<u8> {
        let padded = (name.len() + 1).next_multiple_of(8);
        let cmdsize = (24 + padded) as u32;
        let mut buf = Vec::new();
        buf.extend_from_slice(&cmd.to_ne_bytes());
        buf.extend_from_slice(&cmdsize.to_ne_bytes());
        buf.extend_from_slice(&24u32.to_ne_bytes());
        buf.extend_from_slice(&[0u8; 12]); // timestamp + versions
        buf.extend_from_slice(name.as_bytes());
        buf.resize(24 + padded, 0);
        buf
    }

    fn rpath_command(path: &str) -> Vec<u8> {
        let padded = (path.len() + 1).next_multiple_of(8);
        let cmdsize = (12 + padded) as u32;
        let mut buf = Vec::new();
        buf.extend_from_slice(&LC_RPATH.to_ne_bytes());
        buf.extend_from_slice(&cmdsize.to_ne_bytes());
        buf.extend_from_slice(&12u32.to_ne_bytes());
        buf.extend_from_slice(path.as_bytes());
        buf.resize(12 + padded, 0);
        buf
    }

    /// A thin slice: header followed by its load commands.
    fn thin_slice(magic: u32, cputype: u32, cpusubtype: u32, commands: &[Vec<u8>]) -> Vec<u8> {
        let body: Vec<u8> = commands.iter().flatten().copied().collect();
        let mut buf = Vec::new();
        for field in [
            magic,
            cputype,
            cpusubtype,
            MH_DYLIB,
            commands.len() as u32,
            body.len() as u32,
            0, // flags
        ] {
            buf.extend_from_slice(&field.to_ne_bytes());
        }
        if magic == MH_MAGIC_64 {
            buf.extend_from_slice(&0u32.to_ne_bytes()); // reserved
        }
        buf.extend(body);
        buf
    }

    /// A fat container. Descriptor fields are stored byte-swapped, as
    /// the format requires for either magic variant.
    fn fat_binary(magic: u32, slices: &[(u32, u32, Vec<u8>)]) -> Vec<u8> {
        let wide = magic == FAT_MAGIC_64 || magic == FAT_CIGAM_64;
        let desc_len = if wide { 32 } else { 20 };

        let mut buf = Vec::new();
        buf.extend_from_slice(&magic.to_ne_bytes());
        buf.extend_from_slice(&(slices.len() as u32).swap_bytes().to_ne_bytes());

        let mut offset = (8 + desc_len * slices.len()) as u64;
        for (cputype, cpusubtype, body) in slices {
            buf.extend_from_slice(&cputype.swap_bytes().to_ne_bytes());
            buf.extend_from_slice(&cpusubtype.swap_bytes().to_ne_bytes());
            if wide {
                buf.extend_from_slice(&offset.swap_bytes().to_ne_bytes());
                buf.extend_from_slice(&(body.len() as u64).swap_bytes().to_ne_bytes());
                buf.extend_from_slice(&0u32.to_ne_bytes()); // align
                buf.extend_from_slice(&0u32.to_ne_bytes()); // reserved
            } else {
                buf.extend_from_slice(&(offset as u32).swap_bytes().to_ne_bytes());
                buf.extend_from_slice(&(body.len() as u32).swap_bytes().to_ne_bytes());
                buf.extend_from_slice(&0u32.to_ne_bytes()); // align
            }
            offset += body.len() as u64;
        }
        for (_, _, body) in slices {
            buf.extend_from_slice(body);
        }
        buf
    }

    #[test]
    fn test_unrecognized_magic_yields_empty() {
        let mut input = Cursor::new(b"\x7fELF and then some".to_vec());
        let reports = Inspector::new().inspect(&mut input).unwrap();
        assert!(reports.is_empty());
    }

    #[test]
    fn test_thin_64_round_trip() {
        let data = thin_slice(
            MH_MAGIC_64,
            CPU_TYPE_X86_64,
            3,
            &[
                dylib_command(LC_ID_DYLIB, "/usr/lib/libfoo.dylib"),
                dylib_command(LC_LOAD_DYLIB, "/usr/lib/libSystem.B.dylib"),
                rpath_command("@loader_path/../Frameworks"),
            ],
        );

        let reports = Inspector::new().inspect(&mut Cursor::new(data)).unwrap();
        assert_eq!(
            reports,
            vec![SliceReport {
                arch: "x86_64".to_string(),
                dylib_id: Some("/usr/lib/libfoo.dylib".to_string()),
                dependencies: vec!["/usr/lib/libSystem.B.dylib".to_string()],
                rpaths: vec!["@loader_path/../Frameworks".to_string()],
            }]
        );
    }

    #[test]
    fn test_thin_32_header_has_no_reserved_word() {
        let data = thin_slice(
            MH_MAGIC,
            crate::arch::CPU_TYPE_X86,
            3,
            &[dylib_command(LC_LOAD_DYLIB, "/usr/lib/libc.dylib")],
        );

        let reports = Inspector::new().inspect(&mut Cursor::new(data)).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].arch, "i386");
        assert_eq!(reports[0].dependencies, vec!["/usr/lib/libc.dylib"]);
    }

    #[test]
    fn test_thin_unknown_architecture_yields_empty() {
        let data = thin_slice(MH_MAGIC_64, 0x42, 0, &[]);
        let reports = Inspector::new().inspect(&mut Cursor::new(data)).unwrap();
        assert!(reports.is_empty());
    }

    #[test]
    fn test_reversed_thin_header_resolves_no_architecture() {
        // MH_CIGAM slices store their fields byte-swapped, but header
        // fields are read natively; the swapped cputype resolves to no
        // name and the slice is skipped. Preserved from the original
        // behavior.
        let data = thin_slice(MH_CIGAM_64, CPU_TYPE_X86_64.swap_bytes(), 0, &[]);
        let reports = Inspector::new().inspect(&mut Cursor::new(data)).unwrap();
        assert!(reports.is_empty());
    }

    #[test]
    fn test_fat_two_slices_in_table_order() {
        let x86 = thin_slice(
            MH_MAGIC_64,
            CPU_TYPE_X86_64,
            3,
            &[dylib_command(LC_LOAD_DYLIB, "/usr/lib/libx.dylib")],
        );
        let arm = thin_slice(
            MH_MAGIC_64,
            CPU_TYPE_ARM64,
            0,
            &[dylib_command(LC_LOAD_DYLIB, "/usr/lib/liba.dylib")],
        );
        let data = fat_binary(
            FAT_MAGIC,
            &[(CPU_TYPE_X86_64, 3, x86), (CPU_TYPE_ARM64, 0, arm)],
        );

        let reports = Inspector::new().inspect(&mut Cursor::new(data)).unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].arch, "x86_64");
        assert_eq!(reports[0].dependencies, vec!["/usr/lib/libx.dylib"]);
        assert_eq!(reports[1].arch, "arm64");
        assert_eq!(reports[1].dependencies, vec!["/usr/lib/liba.dylib"]);
    }

    #[test]
    fn test_fat_64_descriptors() {
        let arm = thin_slice(
            MH_MAGIC_64,
            CPU_TYPE_ARM64,
            2,
            &[rpath_command("@executable_path")],
        );
        let data = fat_binary(FAT_MAGIC_64, &[(CPU_TYPE_ARM64, 2, arm)]);

        let reports = Inspector::new().inspect(&mut Cursor::new(data)).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].arch, "arm64e");
        assert_eq!(reports[0].rpaths, vec!["@executable_path"]);
    }

    #[test]
    fn test_fat_magic_variants_decode_identically() {
        let body = thin_slice(MH_MAGIC_64, CPU_TYPE_ARM64, 0, &[]);
        let native = fat_binary(FAT_MAGIC, &[(CPU_TYPE_ARM64, 0, body.clone())]);
        let swapped = fat_binary(FAT_CIGAM, &[(CPU_TYPE_ARM64, 0, body)]);

        let inspector = Inspector::new();
        let a = inspector.inspect(&mut Cursor::new(native)).unwrap();
        let b = inspector.inspect(&mut Cursor::new(swapped)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn test_fat_unknown_descriptor_skipped_siblings_decode() {
        let arm = thin_slice(MH_MAGIC_64, CPU_TYPE_ARM64, 0, &[]);
        let data = fat_binary(
            FAT_MAGIC,
            &[
                (0x42, 0, vec![0u8; 32]), // resolvable by nobody
                (CPU_TYPE_ARM64, 0, arm),
            ],
        );

        let reports = Inspector::new().inspect(&mut Cursor::new(data)).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].arch, "arm64");
    }

    #[test]
    fn test_fat_zero_descriptors() {
        let data = fat_binary(FAT_MAGIC, &[]);
        let reports = Inspector::new().inspect(&mut Cursor::new(data)).unwrap();
        assert!(reports.is_empty());
    }

    #[test]
    fn test_fat_descriptor_offset_past_eof_fails_only_that_slice() {
        let arm = thin_slice(MH_MAGIC_64, CPU_TYPE_ARM64, 0, &[]);
        let mut data = fat_binary(
            FAT_MAGIC,
            &[(CPU_TYPE_X86_64, 3, vec![]), (CPU_TYPE_ARM64, 0, arm)],
        );
        // Point the first descriptor far past end-of-input.
        data[16..20].copy_from_slice(&0x00ff_0000u32.swap_bytes().to_ne_bytes());

        let reports = Inspector::new().inspect(&mut Cursor::new(data)).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].arch, "arm64");
    }

    #[test]
    fn test_sizeofcmds_clamped_to_input_length() {
        let mut data = thin_slice(
            MH_MAGIC_64,
            CPU_TYPE_X86_64,
            3,
            &[dylib_command(LC_LOAD_DYLIB, "/usr/lib/liba.dylib")],
        );
        // Inflate the declared command-stream length far past the input.
        data[20..24].copy_from_slice(&u32::MAX.to_ne_bytes());

        let reports = Inspector::new().inspect(&mut Cursor::new(data)).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].dependencies, vec!["/usr/lib/liba.dylib"]);
    }

    #[test]
    fn test_idempotent_across_runs() {
        let arm = thin_slice(
            MH_MAGIC_64,
            CPU_TYPE_ARM64,
            0,
            &[dylib_command(LC_LOAD_DYLIB, "/usr/lib/liba.dylib")],
        );
        let data = fat_binary(FAT_MAGIC, &[(CPU_TYPE_ARM64, 0, arm)]);

        let inspector = Inspector::new();
        let first = inspector.inspect(&mut Cursor::new(data.clone())).unwrap();
        let second = inspector.inspect(&mut Cursor::new(data)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_locate_reports_slice_offsets() {
        let x86 = thin_slice(MH_MAGIC_64, CPU_TYPE_X86_64, 3, &[]);
        let x86_len = x86.len() as u64;
        let arm = thin_slice(MH_MAGIC, crate::arch::CPU_TYPE_ARM, 9, &[]);
        let data = fat_binary(
            FAT_MAGIC,
            &[(CPU_TYPE_X86_64, 3, x86), (crate::arch::CPU_TYPE_ARM, 9, arm)],
        );

        let slices = Inspector::new().locate(&mut Cursor::new(data)).unwrap();
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].offset, 8 + 2 * 20);
        assert!(slices[0].is_64bit);
        assert_eq!(slices[1].arch, "armv7");
        assert_eq!(slices[1].offset, 8 + 2 * 20 + x86_len);
        assert!(!slices[1].is_64bit);
    }

    #[test]
    fn test_inspector_config_builder() {
        let config = InspectorConfig::new().max_command_bytes(1024);
        assert_eq!(config.max_command_bytes, 1024);
    }

    #[test]
    fn test_inspect_file_round_trip() {
        use std::io::Write;

        let data = thin_slice(
            MH_MAGIC_64,
            CPU_TYPE_ARM64,
            0,
            &[rpath_command("@loader_path")],
        );
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&data).unwrap();

        let reports = inspect_file(file.path()).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].rpaths, vec!["@loader_path"]);
    }

    #[test]
    fn test_inspect_file_missing_path() {
        let err = inspect_file("/nonexistent/definitely-not-here").unwrap_err();
        assert!(matches!(err, Error::FileRead { .. }));
    }
}
