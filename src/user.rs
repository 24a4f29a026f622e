//! Current OS user name lookup.
//!
//! Checks `LOGNAME`, `USER`, `LNAME` and `USERNAME` in that order, then falls
//! back to the password database entry of the real user ID on Unix.

/// Environment variables consulted for the user name, in priority order.
const USER_ENV_VARS: &[&str] = &["LOGNAME", "USER", "LNAME", "USERNAME"];

/// Get the current OS user name.
pub fn current_username() -> Option<String> {
    USER_ENV_VARS
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|name| !name.is_empty())
        .or_else(passwd_username)
}

/// Look up the user name of the real UID in the password database.
#[cfg(unix)]
fn passwd_username() -> Option<String> {
    use std::ffi::CStr;

    let uid = unsafe { libc::getuid() };
    let mut buf: Vec<libc::c_char> = vec![0; 1024];
    let mut pwd: libc::passwd = unsafe { std::mem::zeroed() };
    let mut result: *mut libc::passwd = std::ptr::null_mut();

    let rc = loop {
        // getpwuid_r writes the strings of `pwd` into `buf`
        let rc = unsafe {
            libc::getpwuid_r(uid, &mut pwd, buf.as_mut_ptr(), buf.len(), &mut result)
        };
        if rc == libc::ERANGE && buf.len() < 64 * 1024 {
            let grown = buf.len() * 2;
            buf.resize(grown, 0);
            continue;
        }
        break rc;
    };

    if rc != 0 || result.is_null() || pwd.pw_name.is_null() {
        return None;
    }
    let name = unsafe { CStr::from_ptr(pwd.pw_name) }
        .to_string_lossy()
        .into_owned();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

#[cfg(not(unix))]
fn passwd_username() -> Option<String> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_username_is_not_empty() {
        if let Some(name) = current_username() {
            assert!(!name.is_empty());
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_passwd_username_shape() {
        // Minimal containers may run as a uid without a passwd entry
        if let Some(name) = passwd_username() {
            assert!(!name.contains('\0'));
            assert!(!name.is_empty());
        }
    }
}
