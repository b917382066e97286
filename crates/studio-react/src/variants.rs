//! Variant overrides.
//!
//! A component with variants resolves its overrides at runtime from the
//! variants matching the current props, and the current breakpoint when any
//! variant is keyed on one:
//!
//! ```text
//! const variants = [{ variantValues: { breakpoint: "small" }, overrides: { Hero: { width: "100px" } } }];
//! const breakpointHook = useBreakpointValue({ small: "small" }, "small");
//! const overrides = { ...getOverridesFromVariants(variants, { breakpoint: breakpointHook, ...props }), ...overridesProp };
//! ```

use crate::ast::{Expr, ObjectMember, Stmt};
use crate::hooks::HookName;
use studio_core::{StudioComponent, StudioComponentVariant};
use tracing::debug;

const VARIANTS: &str = "variants";
const BREAKPOINT: &str = "breakpoint";
const BREAKPOINT_HOOK: &str = "breakpointHook";

/// Name the caller's own overrides are destructured to when variants
/// compute `overrides`.
pub fn overrides_prop_alias(overrides: &str) -> String {
    format!("{overrides}Prop")
}

/// The variants as an array literal, in declaration order.
pub fn variants_expression(variants: &[StudioComponentVariant]) -> Expr {
    Expr::Array(
        variants
            .iter()
            .map(|variant| {
                let values = variant
                    .variant_values
                    .iter()
                    .map(|(key, value)| ObjectMember::property(key, Expr::string(value)));
                let overrides = variant
                    .overrides
                    .iter()
                    .map(|(element, value)| ObjectMember::property(element, Expr::from_json(value)));
                Expr::object([
                    ObjectMember::property("variantValues", Expr::object(values)),
                    ObjectMember::property("overrides", Expr::object(overrides)),
                ])
            })
            .collect(),
    )
}

/// Statements that compute `overrides` from the component's variants.
///
/// Overrides passed by the caller win over variant overrides. Returns no
/// statements for a component without variants.
pub fn build_variant_statements(component: &StudioComponent, props: &str, overrides: &str) -> Vec<Stmt> {
    if !component.has_variants() {
        return Vec::new();
    }

    let mut statements = vec![Stmt::const_decl(VARIANTS, variants_expression(&component.variants))];

    let breakpoints = component.breakpoints();
    let variant_props = match breakpoints.first() {
        Some(default) => {
            let sizes = breakpoints
                .iter()
                .map(|size| ObjectMember::property(size.as_str(), Expr::string(size.as_str())));
            statements.push(Stmt::const_decl(
                BREAKPOINT_HOOK,
                Expr::call(
                    Expr::ident(HookName::UseBreakpointValue.as_str()),
                    [Expr::object(sizes), Expr::string(default.as_str())],
                ),
            ));
            Expr::object([
                ObjectMember::property(BREAKPOINT, Expr::ident(BREAKPOINT_HOOK)),
                ObjectMember::spread(Expr::ident(props)),
            ])
        }
        None => Expr::ident(props),
    };

    let from_variants = Expr::call(
        Expr::ident(HookName::GetOverridesFromVariants.as_str()),
        [Expr::ident(VARIANTS), variant_props],
    );
    statements.push(Stmt::const_decl(
        overrides,
        Expr::object([
            ObjectMember::spread(from_variants),
            ObjectMember::spread(Expr::ident(overrides_prop_alias(overrides))),
        ]),
    ));

    debug!(
        variants = component.variants.len(),
        breakpoints = breakpoints.len(),
        "variant overrides built"
    );
    statements
}
