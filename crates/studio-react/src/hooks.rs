//! Runtime hooks and helpers the generated components call.

use std::fmt;

/// A hook or helper exported by the target framework's runtime package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HookName {
    UseNavigateAction,
    UseDataStoreCreateAction,
    UseDataStoreUpdateAction,
    UseDataStoreDeleteAction,
    UseAuthSignOutAction,
    UseStateMutationAction,
    UseDataStoreBinding,
    UseAuth,
    UseBreakpointValue,
    GetOverrideProps,
    GetOverridesFromVariants,
}

impl HookName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UseNavigateAction => "useNavigateAction",
            Self::UseDataStoreCreateAction => "useDataStoreCreateAction",
            Self::UseDataStoreUpdateAction => "useDataStoreUpdateAction",
            Self::UseDataStoreDeleteAction => "useDataStoreDeleteAction",
            Self::UseAuthSignOutAction => "useAuthSignOutAction",
            Self::UseStateMutationAction => "useStateMutationAction",
            Self::UseDataStoreBinding => "useDataStoreBinding",
            Self::UseAuth => "useAuth",
            Self::UseBreakpointValue => "useBreakpointValue",
            Self::GetOverrideProps => "getOverrideProps",
            Self::GetOverridesFromVariants => "getOverridesFromVariants",
        }
    }
}

impl fmt::Display for HookName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
