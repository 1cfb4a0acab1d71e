//! Mitigation provider
//!
//! Queries the OS for a process's exploit mitigation policy flags and
//! exposes them as a `MitigationRecord`. Mitigation policies are a Windows
//! concept; on other platforms every query reports the platform as
//! unsupported.

#[cfg(not(windows))]
pub use self::unsupported::query;
#[cfg(windows)]
pub use self::windows_impl::query;

#[cfg(not(windows))]
mod unsupported {
    use listmit::models::{MitigationRecord, ProviderError};

    pub fn query(_pid: u32) -> Result<MitigationRecord, ProviderError> {
        Err(ProviderError::Unsupported)
    }
}

#[cfg(windows)]
mod windows_impl {
    use listmit::models::{MitigationRecord, ProviderError};
    use std::ffi::c_void;
    use windows::Win32::Foundation::{CloseHandle, HANDLE};
    use windows::Win32::System::Threading::{
        GetCurrentProcess, GetProcessMitigationPolicy, OpenProcess, ProcessASLRPolicy,
        ProcessControlFlowGuardPolicy, ProcessDEPPolicy, ProcessDynamicCodePolicy,
        ProcessExtensionPointDisablePolicy, ProcessFontDisablePolicy, ProcessImageLoadPolicy,
        ProcessSignaturePolicy, ProcessStrictHandleCheckPolicy, ProcessSystemCallDisablePolicy,
        PROCESS_MITIGATION_ASLR_POLICY, PROCESS_MITIGATION_BINARY_SIGNATURE_POLICY,
        PROCESS_MITIGATION_CONTROL_FLOW_GUARD_POLICY, PROCESS_MITIGATION_DEP_POLICY,
        PROCESS_MITIGATION_DYNAMIC_CODE_POLICY,
        PROCESS_MITIGATION_EXTENSION_POINT_DISABLE_POLICY,
        PROCESS_MITIGATION_FONT_DISABLE_POLICY, PROCESS_MITIGATION_IMAGE_LOAD_POLICY,
        PROCESS_MITIGATION_POLICY, PROCESS_MITIGATION_STRICT_HANDLE_CHECK_POLICY,
        PROCESS_MITIGATION_SYSTEM_CALL_DISABLE_POLICY, PROCESS_QUERY_INFORMATION,
    };

    // winnt.h bitfield layouts, lowest bit first

    const DEP_ENABLE: u32 = 1 << 0;
    const DEP_DISABLE_ATL_THUNK_EMULATION: u32 = 1 << 1;

    const ASLR_BOTTOM_UP: u32 = 1 << 0;
    const ASLR_FORCE_RELOCATE_IMAGES: u32 = 1 << 1;
    const ASLR_HIGH_ENTROPY: u32 = 1 << 2;
    const ASLR_DISALLOW_STRIPPED_IMAGES: u32 = 1 << 3;

    const DYNCODE_PROHIBIT: u32 = 1 << 0;
    const DYNCODE_ALLOW_THREAD_OPT_OUT: u32 = 1 << 1;
    const DYNCODE_ALLOW_REMOTE_DOWNGRADE: u32 = 1 << 2;
    const DYNCODE_AUDIT_PROHIBIT: u32 = 1 << 3;

    const HANDLE_RAISE_EXCEPTION_ON_INVALID_REFERENCE: u32 = 1 << 0;
    const HANDLE_EXCEPTIONS_PERMANENTLY_ENABLED: u32 = 1 << 1;

    const SYSCALL_DISALLOW_WIN32K: u32 = 1 << 0;
    const SYSCALL_AUDIT_DISALLOW_WIN32K: u32 = 1 << 1;

    const EXTENSION_POINT_DISABLE: u32 = 1 << 0;

    const CFG_ENABLE: u32 = 1 << 0;
    const CFG_EXPORT_SUPPRESSION: u32 = 1 << 1;
    const CFG_STRICT_MODE: u32 = 1 << 2;

    const SIGNATURE_MICROSOFT_SIGNED_ONLY: u32 = 1 << 0;
    const SIGNATURE_STORE_SIGNED_ONLY: u32 = 1 << 1;
    const SIGNATURE_MITIGATION_OPT_IN: u32 = 1 << 2;

    const FONT_DISABLE_NON_SYSTEM: u32 = 1 << 0;
    const FONT_AUDIT_NON_SYSTEM_LOADING: u32 = 1 << 1;

    const IMAGE_NO_REMOTE: u32 = 1 << 0;
    const IMAGE_NO_LOW_MANDATORY_LABEL: u32 = 1 << 1;
    const IMAGE_PREFER_SYSTEM32: u32 = 1 << 2;

    /// RAII wrapper for the opened process handle. The pseudo-handle
    /// returned by GetCurrentProcess must not be closed.
    struct ProcessHandle {
        handle: HANDLE,
        owned: bool,
    }

    impl Drop for ProcessHandle {
        fn drop(&mut self) {
            if self.owned && !self.handle.is_invalid() {
                unsafe {
                    let _ = CloseHandle(self.handle);
                }
            }
        }
    }

    fn open(pid: u32) -> Result<ProcessHandle, ProviderError> {
        if pid == std::process::id() {
            return Ok(ProcessHandle {
                handle: unsafe { GetCurrentProcess() },
                owned: false,
            });
        }

        let handle = unsafe { OpenProcess(PROCESS_QUERY_INFORMATION, false, pid) }
            .map_err(|_| ProviderError::AccessDenied { pid })?;
        if handle.is_invalid() {
            return Err(ProviderError::AccessDenied { pid });
        }

        Ok(ProcessHandle {
            handle,
            owned: true,
        })
    }

    fn query_policy<T>(
        handle: HANDLE,
        policy: PROCESS_MITIGATION_POLICY,
        pid: u32,
        name: &'static str,
    ) -> Result<T, ProviderError> {
        // The policy structs are plain C bitfield containers; zeroed is the
        // documented "nothing set" state.
        let mut value: T = unsafe { std::mem::zeroed() };
        unsafe {
            GetProcessMitigationPolicy(
                handle,
                policy,
                &mut value as *mut T as *mut c_void,
                std::mem::size_of::<T>(),
            )
        }
        .map_err(|e| ProviderError::Query {
            pid,
            policy: name,
            message: e.message().to_string(),
        })?;
        Ok(value)
    }

    /// Query every mitigation policy class for one process
    pub fn query(pid: u32) -> Result<MitigationRecord, ProviderError> {
        let process = open(pid)?;
        let handle = process.handle;
        let mut record = MitigationRecord::default();

        let dep: PROCESS_MITIGATION_DEP_POLICY =
            query_policy(handle, ProcessDEPPolicy, pid, "DEP")?;
        let flags = unsafe { dep.Anonymous.Flags };
        record.dep_enabled = flags & DEP_ENABLE != 0;
        record.disable_atl_thunk_emulation = flags & DEP_DISABLE_ATL_THUNK_EMULATION != 0;
        record.dep_permanent = dep.Permanent.as_bool();

        let aslr: PROCESS_MITIGATION_ASLR_POLICY =
            query_policy(handle, ProcessASLRPolicy, pid, "ASLR")?;
        let flags = unsafe { aslr.Anonymous.Flags };
        record.enable_bottom_up_randomization = flags & ASLR_BOTTOM_UP != 0;
        record.enable_force_relocate_images = flags & ASLR_FORCE_RELOCATE_IMAGES != 0;
        record.enable_high_entropy = flags & ASLR_HIGH_ENTROPY != 0;
        record.disallow_stripped_images = flags & ASLR_DISALLOW_STRIPPED_IMAGES != 0;

        let dynamic_code: PROCESS_MITIGATION_DYNAMIC_CODE_POLICY =
            query_policy(handle, ProcessDynamicCodePolicy, pid, "dynamic code")?;
        let flags = unsafe { dynamic_code.Anonymous.Flags };
        record.prohibit_dynamic_code = flags & DYNCODE_PROHIBIT != 0;
        record.allow_thread_opt_out = flags & DYNCODE_ALLOW_THREAD_OPT_OUT != 0;
        record.allow_remote_downgrade = flags & DYNCODE_ALLOW_REMOTE_DOWNGRADE != 0;
        record.audit_prohibit_dynamic_code = flags & DYNCODE_AUDIT_PROHIBIT != 0;

        let strict_handle: PROCESS_MITIGATION_STRICT_HANDLE_CHECK_POLICY =
            query_policy(handle, ProcessStrictHandleCheckPolicy, pid, "strict handle check")?;
        let flags = unsafe { strict_handle.Anonymous.Flags };
        record.raise_exception_on_invalid_handle_reference =
            flags & HANDLE_RAISE_EXCEPTION_ON_INVALID_REFERENCE != 0;
        record.handle_exceptions_permanently_enabled =
            flags & HANDLE_EXCEPTIONS_PERMANENTLY_ENABLED != 0;

        let syscall: PROCESS_MITIGATION_SYSTEM_CALL_DISABLE_POLICY =
            query_policy(handle, ProcessSystemCallDisablePolicy, pid, "system call disable")?;
        let flags = unsafe { syscall.Anonymous.Flags };
        record.disallow_win32k_system_calls = flags & SYSCALL_DISALLOW_WIN32K != 0;
        record.audit_disallow_win32k_system_calls = flags & SYSCALL_AUDIT_DISALLOW_WIN32K != 0;

        let extension_points: PROCESS_MITIGATION_EXTENSION_POINT_DISABLE_POLICY =
            query_policy(handle, ProcessExtensionPointDisablePolicy, pid, "extension point")?;
        let flags = unsafe { extension_points.Anonymous.Flags };
        record.disable_extension_points = flags & EXTENSION_POINT_DISABLE != 0;

        let cfg: PROCESS_MITIGATION_CONTROL_FLOW_GUARD_POLICY =
            query_policy(handle, ProcessControlFlowGuardPolicy, pid, "control flow guard")?;
        let flags = unsafe { cfg.Anonymous.Flags };
        record.enable_control_flow_guard = flags & CFG_ENABLE != 0;
        record.enable_export_suppression = flags & CFG_EXPORT_SUPPRESSION != 0;
        record.control_flow_guard_strict_mode = flags & CFG_STRICT_MODE != 0;

        let signature: PROCESS_MITIGATION_BINARY_SIGNATURE_POLICY =
            query_policy(handle, ProcessSignaturePolicy, pid, "binary signature")?;
        let flags = unsafe { signature.Anonymous.Flags };
        record.microsoft_signed_only = flags & SIGNATURE_MICROSOFT_SIGNED_ONLY != 0;
        record.store_signed_only = flags & SIGNATURE_STORE_SIGNED_ONLY != 0;
        record.signed_mitigation_opt_in = flags & SIGNATURE_MITIGATION_OPT_IN != 0;

        let fonts: PROCESS_MITIGATION_FONT_DISABLE_POLICY =
            query_policy(handle, ProcessFontDisablePolicy, pid, "font disable")?;
        let flags = unsafe { fonts.Anonymous.Flags };
        record.disable_non_system_fonts = flags & FONT_DISABLE_NON_SYSTEM != 0;
        record.audit_non_system_font_loading = flags & FONT_AUDIT_NON_SYSTEM_LOADING != 0;

        let image_load: PROCESS_MITIGATION_IMAGE_LOAD_POLICY =
            query_policy(handle, ProcessImageLoadPolicy, pid, "image load")?;
        let flags = unsafe { image_load.Anonymous.Flags };
        record.no_remote_images = flags & IMAGE_NO_REMOTE != 0;
        record.no_low_mandatory_label_images = flags & IMAGE_NO_LOW_MANDATORY_LABEL != 0;
        record.prefer_system32_images = flags & IMAGE_PREFER_SYSTEM32 != 0;

        Ok(record)
    }
}
