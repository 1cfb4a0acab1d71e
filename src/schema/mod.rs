//! Mitigation attribute schema
//!
//! A fixed registration table mapping mitigation attribute names to typed
//! accessors over `MitigationRecord`. Built once at startup and read-only
//! afterward; lookups are case-insensitive and iteration is ordered by
//! name so output stays deterministic.

use crate::models::MitigationRecord;
use std::collections::BTreeMap;

/// Accessor extracting one attribute's boolean value from a record
pub type Accessor = fn(&MitigationRecord) -> bool;

/// One named mitigation attribute and its accessor
#[derive(Clone, Copy)]
pub struct MitigationAttribute {
    /// Canonical display name
    pub name: &'static str,
    accessor: Accessor,
}

impl MitigationAttribute {
    /// Extract this attribute's value from a record
    pub fn value(&self, record: &MitigationRecord) -> bool {
        (self.accessor)(record)
    }
}

/// Registration table for every known mitigation attribute.
/// Adding a field to `MitigationRecord` means adding a row here.
static ATTRIBUTES: &[(&str, Accessor)] = &[
    ("DepEnabled", |m| m.dep_enabled),
    ("DisableAtlThunkEmulation", |m| m.disable_atl_thunk_emulation),
    ("DepPermanent", |m| m.dep_permanent),
    ("EnableBottomUpRandomization", |m| {
        m.enable_bottom_up_randomization
    }),
    ("EnableForceRelocateImages", |m| {
        m.enable_force_relocate_images
    }),
    ("EnableHighEntropy", |m| m.enable_high_entropy),
    ("DisallowStrippedImages", |m| m.disallow_stripped_images),
    ("ProhibitDynamicCode", |m| m.prohibit_dynamic_code),
    ("AllowThreadOptOut", |m| m.allow_thread_opt_out),
    ("AllowRemoteDowngrade", |m| m.allow_remote_downgrade),
    ("AuditProhibitDynamicCode", |m| m.audit_prohibit_dynamic_code),
    ("RaiseExceptionOnInvalidHandleReference", |m| {
        m.raise_exception_on_invalid_handle_reference
    }),
    ("HandleExceptionsPermanentlyEnabled", |m| {
        m.handle_exceptions_permanently_enabled
    }),
    ("DisallowWin32kSystemCalls", |m| {
        m.disallow_win32k_system_calls
    }),
    ("AuditDisallowWin32kSystemCalls", |m| {
        m.audit_disallow_win32k_system_calls
    }),
    ("DisableExtensionPoints", |m| m.disable_extension_points),
    ("EnableControlFlowGuard", |m| m.enable_control_flow_guard),
    ("EnableExportSuppression", |m| m.enable_export_suppression),
    ("ControlFlowGuardStrictMode", |m| {
        m.control_flow_guard_strict_mode
    }),
    ("MicrosoftSignedOnly", |m| m.microsoft_signed_only),
    ("StoreSignedOnly", |m| m.store_signed_only),
    ("SignedMitigationOptIn", |m| m.signed_mitigation_opt_in),
    ("DisableNonSystemFonts", |m| m.disable_non_system_fonts),
    ("AuditNonSystemFontLoading", |m| {
        m.audit_non_system_font_loading
    }),
    ("NoRemoteImages", |m| m.no_remote_images),
    ("NoLowMandatoryLabelImages", |m| {
        m.no_low_mandatory_label_images
    }),
    ("PreferSystem32Images", |m| m.prefer_system32_images),
];

/// Ordered, case-insensitive mapping from attribute name to accessor
pub struct MitigationSchema {
    attributes: BTreeMap<String, MitigationAttribute>,
}

impl MitigationSchema {
    /// Build the schema from the registration table. Called once at startup;
    /// cannot fail.
    pub fn build() -> Self {
        let attributes = ATTRIBUTES
            .iter()
            .map(|&(name, accessor)| {
                (name.to_lowercase(), MitigationAttribute { name, accessor })
            })
            .collect();
        Self { attributes }
    }

    /// Look up an attribute by name, case-insensitively.
    /// Unknown names return None; they are never an error.
    pub fn get(&self, name: &str) -> Option<&MitigationAttribute> {
        self.attributes.get(&name.to_lowercase())
    }

    /// All attributes, ordered by lower-cased name
    pub fn attributes(&self) -> impl Iterator<Item = &MitigationAttribute> {
        self.attributes.values()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}
