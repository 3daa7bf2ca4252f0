//! Default field schemas for the ZFS listing tools.
//!
//! Both tools are invoked with `-H -o all`, which prints every property
//! as a tab-separated column with no header row, so the order of these
//! lists is the contract: position in the output line is matched to
//! position in the schema. Callers may substitute their own ordered
//! field sequence per construction; the size-typed subsets stay fixed
//! per resource kind.

/// Column order of `zpool list -H -o all`.
pub const POOL_FIELDS: &[&str] = &[
    "name",
    "size",
    "cap",
    "altroot",
    "health",
    "guid",
    "version",
    "bootfs",
    "delegation",
    "replace",
    "cachefile",
    "failmode",
    "listsnaps",
    "expand",
    "dedupditto",
    "dedup",
    "free",
    "alloc",
    "rdonly",
];

/// Pool fields whose values are byte sizes.
pub const POOL_SIZE_FIELDS: &[&str] = &["size", "free", "alloc"];

/// Column order of `zfs list -H -o all`.
pub const MOUNT_FIELDS: &[&str] = &[
    "name",
    "type",
    "creation",
    "used",
    "avail",
    "refer",
    "ratio",
    "mounted",
    "origin",
    "quota",
    "reserv",
    "volsize",
    "volblock",
    "recsize",
    "mountpoint",
    "sharenfs",
    "checksum",
    "compress",
    "atime",
    "devices",
    "exec",
    "setuid",
    "rdonly",
    "zoned",
    "snapdir",
    "aclinherit",
    "canmount",
    "xattr",
    "copies",
    "version",
    "utf8only",
    "normalization",
    "case",
    "vscan",
    "nbmand",
    "sharesmb",
    "refquota",
    "refreserv",
    "primarycache",
    "secondarycache",
    "usedsnap",
    "usedds",
    "usedchild",
    "usedrefreserv",
    "defer_destroy",
    "userrefs",
    "logbias",
    "dedup",
    "mlslabel",
    "sync",
    "crypt",
    "keysource",
    "keystatus",
    "rekeydate",
    "rstchown",
    "org.opensolaris.caiman:install",
];

/// Mount fields whose values are byte sizes.
pub const MOUNT_SIZE_FIELDS: &[&str] = &[
    "avail",
    "quota",
    "recsize",
    "refer",
    "refquota",
    "refreserv",
    "reserv",
    "used",
    "usedchild",
    "usedds",
    "usedrefreserv",
    "usedsnap",
    "volblock",
    "volsize",
];
