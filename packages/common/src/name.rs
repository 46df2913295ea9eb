//! Account naming rules
//!
//! Accounts form namespaces: `conr2d.com` is a sub-account of `conr2d`, and
//! whoever controls the root account holds "virtual" authority over every
//! name below it.

use cosmwasm_std::Addr;

/// Sentinel account standing for "nobody": issuing from it mints, sending to
/// it retires.
pub const NULL_ACCOUNT: &str = "gxc.null";

/// Root account of a name, i.e. everything before the first `.`.
pub fn basename(name: &str) -> &str {
    match name.find('.') {
        Some(pos) => &name[..pos],
        None => name,
    }
}

/// Whether `sender` directly controls the root account of `name`.
pub fn has_vauth(sender: &Addr, name: &str) -> bool {
    sender.as_str() == basename(name)
}

pub fn is_null(name: &str) -> bool {
    name == NULL_ACCOUNT
}
