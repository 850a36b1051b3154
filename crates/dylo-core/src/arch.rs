//! Architecture-name resolution from Mach-O cpu type identifiers.
//!
//! Mach-O identifies the target architecture of a slice by a
//! `(cpu_type, cpu_subtype)` pair. This module maps the pairs relevant to
//! shipped Apple binaries onto their conventional short names (the same
//! names `NXGetArchInfoFromCpuType` returns), e.g. `x86_64` or `arm64e`.
//!
//! Definitions follow `<mach/machine.h>`.

/// mask for architecture bits in a cpu type
pub const CPU_ARCH_MASK: u32 = 0xff00_0000;
/// 64 bit ABI
pub const CPU_ARCH_ABI64: u32 = 0x0100_0000;
/// ABI for 64-bit hardware with 32-bit types
pub const CPU_ARCH_ABI64_32: u32 = 0x0200_0000;

/// mask for capability bits in a cpu subtype
pub const CPU_SUBTYPE_MASK: u32 = 0xff00_0000;

/// x86 (32-bit)
pub const CPU_TYPE_X86: u32 = 7;
/// x86_64
pub const CPU_TYPE_X86_64: u32 = CPU_TYPE_X86 | CPU_ARCH_ABI64;
/// arm (32-bit)
pub const CPU_TYPE_ARM: u32 = 12;
/// arm64
pub const CPU_TYPE_ARM64: u32 = CPU_TYPE_ARM | CPU_ARCH_ABI64;
/// arm64_32 (watchOS)
pub const CPU_TYPE_ARM64_32: u32 = CPU_TYPE_ARM | CPU_ARCH_ABI64_32;
/// PowerPC (32-bit)
pub const CPU_TYPE_POWERPC: u32 = 18;
/// PowerPC (64-bit)
pub const CPU_TYPE_POWERPC64: u32 = CPU_TYPE_POWERPC | CPU_ARCH_ABI64;

const CPU_SUBTYPE_X86_64_H: u32 = 8;
const CPU_SUBTYPE_ARM_V6: u32 = 6;
const CPU_SUBTYPE_ARM_V7: u32 = 9;
const CPU_SUBTYPE_ARM_V7S: u32 = 11;
const CPU_SUBTYPE_ARM_V7K: u32 = 12;
const CPU_SUBTYPE_ARM64_E: u32 = 2;

/// Resolves a `(cpu_type, cpu_subtype)` pair to its conventional
/// architecture name.
///
/// Capability bits in the subtype (the top byte) do not affect the name
/// and are masked off before matching. Returns `None` for pairs with no
/// known name; callers treat that as an unresolvable slice.
pub fn arch_name(cputype: u32, cpusubtype: u32) -> Option<&'static str> {
    let subtype = cpusubtype & !CPU_SUBTYPE_MASK;

    let name = match cputype {
        CPU_TYPE_X86 => "i386",
        CPU_TYPE_X86_64 => match subtype {
            CPU_SUBTYPE_X86_64_H => "x86_64h",
            _ => "x86_64",
        },
        CPU_TYPE_ARM => match subtype {
            CPU_SUBTYPE_ARM_V6 => "armv6",
            CPU_SUBTYPE_ARM_V7 => "armv7",
            CPU_SUBTYPE_ARM_V7S => "armv7s",
            CPU_SUBTYPE_ARM_V7K => "armv7k",
            _ => "arm",
        },
        CPU_TYPE_ARM64 => match subtype {
            CPU_SUBTYPE_ARM64_E => "arm64e",
            _ => "arm64",
        },
        CPU_TYPE_ARM64_32 => "arm64_32",
        CPU_TYPE_POWERPC => "ppc",
        CPU_TYPE_POWERPC64 => "ppc64",
        _ => return None,
    };

    Some(name)
}
