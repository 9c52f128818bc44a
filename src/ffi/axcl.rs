//! `axcl.h` / `axcl_rt.h`: initialization, logging and version queries.

use super::status_only;
use crate::runtime::runtime;
use crate::serializer::ByteArray;
use axcl_sys::{axclError, AXCL_SUCC};
use std::ffi::CStr;
use std::os::raw::c_char;

/// The only config file name `axclInit` accepts.
pub const EXPECTED_CONFIG_NAME: &CStr = c"xxxx.json";

/// Status `axclInit` returns for any other config name.
pub const AXCL_STUB_INIT_FAILED: axclError = 1;

/// Value of `axclrtGetFullVersion` and of `swVersion` in device properties.
pub const FULL_VERSION: &CStr = c"1.0.0";

/// Value of `axclrtGetSocName`.
pub const SOC_NAME: &CStr = c"AX650N";

/// `axclError axclInit(const char *config);`
///
/// Succeeds only for the literal name `"xxxx.json"`. Not traced.
#[no_mangle]
pub unsafe extern "C" fn axclInit(config: *const c_char) -> axclError {
    let rt = runtime();
    if config.is_null() {
        tracing::warn!("axclInit called with NULL config");
        return AXCL_STUB_INIT_FAILED;
    }

    let name = CStr::from_ptr(config);
    let accepted = name == EXPECTED_CONFIG_NAME;
    tracing::debug!(
        config = %name.to_string_lossy(),
        accepted,
        policy = ?rt.status_policy(),
        "axclInit"
    );

    if accepted {
        AXCL_SUCC
    } else {
        AXCL_STUB_INIT_FAILED
    }
}

/// `axclError axclFinalize();`
#[no_mangle]
pub extern "C" fn axclFinalize() -> axclError {
    status_only("axclFinalize", &[])
}

/// `axclError axclSetLogLevel(int32_t lv);`
#[no_mangle]
pub extern "C" fn axclSetLogLevel(lv: i32) -> axclError {
    status_only("axclSetLogLevel", &[&lv])
}

/// `void axclAppLog(int32_t lv, const char *func, const char *file, uint32_t line, const char *fmt, ...);`
///
/// Format arguments after `fmt` are not read; the trace holds `fmt` itself.
/// The message is forwarded to `tracing` at debug level.
#[no_mangle]
pub unsafe extern "C" fn axclAppLog(
    lv: i32,
    func: *const c_char,
    file: *const c_char,
    line: u32,
    fmt: *const c_char,
) {
    let func = ByteArray::from_c_str(func);
    let file = ByteArray::from_c_str(file);
    let fmt = ByteArray::from_c_str(fmt);

    let rt = runtime();
    let mut call = rt.serializer().begin("axclAppLog");
    call.input(&[&lv, &func, &file, &line, &fmt]);
    call.commit();

    tracing::debug!(
        target: "axcl_app",
        app_level = lv,
        func = %String::from_utf8_lossy(func.as_bytes()),
        file = %String::from_utf8_lossy(file.as_bytes()),
        line,
        "{}",
        String::from_utf8_lossy(fmt.as_bytes())
    );
}

/// `axclError axclrtGetVersion(int32_t *major, int32_t *minor, int32_t *patch);`
#[no_mangle]
pub unsafe extern "C" fn axclrtGetVersion(
    major: *mut i32,
    minor: *mut i32,
    patch: *mut i32,
) -> axclError {
    const FUNCTION: &str = "axclrtGetVersion";

    let rt = runtime();
    let mut call = rt.serializer().begin(FUNCTION);
    if major.is_null() || minor.is_null() || patch.is_null() {
        return super::reject_null_output(call, FUNCTION);
    }

    let randomizer = rt.randomizer();
    let version: [i32; 3] = [randomizer.random(), randomizer.random(), randomizer.random()];
    major.write(version[0]);
    minor.write(version[1]);
    patch.write(version[2]);

    let ret = rt.fabricate_status();
    call.output(&[&ret, &version[0], &version[1], &version[2]]);
    call.commit();
    ret
}

/// `const char *axclrtGetFullVersion();`
#[no_mangle]
pub extern "C" fn axclrtGetFullVersion() -> *const c_char {
    FULL_VERSION.as_ptr()
}

/// `const char *axclrtGetSocName();`
#[no_mangle]
pub extern "C" fn axclrtGetSocName() -> *const c_char {
    SOC_NAME.as_ptr()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_accepts_expected_name() {
        assert_eq!(unsafe { axclInit(c"xxxx.json".as_ptr()) }, AXCL_SUCC);
    }

    #[test]
    fn test_init_rejects_other_names() {
        assert_eq!(unsafe { axclInit(c"axcl.json".as_ptr()) }, AXCL_STUB_INIT_FAILED);
        assert_eq!(unsafe { axclInit(c"".as_ptr()) }, AXCL_STUB_INIT_FAILED);
        assert_eq!(unsafe { axclInit(c"xxxx.json ".as_ptr()) }, AXCL_STUB_INIT_FAILED);
        assert_eq!(unsafe { axclInit(std::ptr::null()) }, AXCL_STUB_INIT_FAILED);
    }

    #[test]
    fn test_fixed_strings() {
        let version = unsafe { CStr::from_ptr(axclrtGetFullVersion()) };
        assert_eq!(version.to_bytes(), b"1.0.0");
        let soc = unsafe { CStr::from_ptr(axclrtGetSocName()) };
        assert_eq!(soc.to_bytes(), b"AX650N");
    }
}
