//! Property-based tests for interface validation using proptest.
//!
//! These check the structural guarantees of the comparators and validator:
//!
//! - Identical definitions never produce errors
//! - Every divergence reports the reference value as `expected`
//! - Validation is deterministic for the same input

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use std::collections::HashSet;

    use crate::interface::compare::{compare_methods, compare_properties};
    use crate::interface::types::{
        InterfaceDefinition, MethodSignature, MismatchKind, ParameterDefinition,
        PropertyDefinition,
    };
    use crate::interface::validator::InterfaceValidator;
    use crate::interface::value::DefaultValue;
    use crate::platform::Platform;

    fn type_name() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("String".to_string()),
            Just("Int".to_string()),
            Just("Bool".to_string()),
            Just("Float".to_string()),
            Just("void".to_string()),
        ]
    }

    fn default_value() -> impl Strategy<Value = Option<DefaultValue>> {
        prop_oneof![
            Just(None),
            Just(Some(DefaultValue::Null)),
            any::<bool>().prop_map(|b| Some(DefaultValue::Bool(b))),
            (-100i64..100).prop_map(|n| Some(DefaultValue::from(n))),
            "[a-z]{0,6}".prop_map(|s| Some(DefaultValue::String(s))),
        ]
    }

    fn property() -> impl Strategy<Value = PropertyDefinition> {
        ("[a-z][a-zA-Z]{0,8}", type_name(), any::<bool>(), default_value()).prop_map(
            |(name, ty, required, default_value)| PropertyDefinition {
                default_value,
                ..PropertyDefinition::new(name, ty, required)
            },
        )
    }

    fn method() -> impl Strategy<Value = MethodSignature> {
        (
            "[a-z][a-zA-Z]{0,8}",
            type_name(),
            prop::collection::vec((type_name(), any::<bool>()), 0..4),
        )
            .prop_map(|(name, ret, params)| {
                params
                    .into_iter()
                    .enumerate()
                    .fold(MethodSignature::new(name, ret), |m, (i, (ty, required))| {
                        m.with_parameter(ParameterDefinition::new(format!("p{}", i), ty, required))
                    })
            })
    }

    fn definition(platform: Platform) -> impl Strategy<Value = InterfaceDefinition> {
        (
            prop::collection::vec(property(), 0..6),
            prop::collection::vec(method(), 0..4),
        )
            .prop_map(move |(mut properties, mut methods)| {
                // Element names are unique within one definition
                let mut seen = HashSet::new();
                properties.retain(|p| seen.insert(p.name.clone()));
                let mut seen = HashSet::new();
                methods.retain(|m| seen.insert(m.name.clone()));
                InterfaceDefinition {
                    properties,
                    methods,
                    ..InterfaceDefinition::new("Component", platform)
                }
            })
    }

    proptest! {
        /// A definition compared with itself on every platform is valid.
        #[test]
        fn identical_definitions_are_valid(def in definition(Platform::Ios)) {
            let defs: Vec<_> = Platform::ALL.iter().map(|p| def.for_platform(*p)).collect();
            let report = InterfaceValidator::new().validate_interfaces(&defs).unwrap();
            prop_assert!(report.valid);
            prop_assert_eq!(report.error_summary.total, 0);
        }

        /// Type mismatches always carry the reference type as `expected`.
        #[test]
        fn type_mismatch_direction(
            name in "[a-z]{1,8}",
            a in type_name(),
            b in type_name(),
        ) {
            let reference = vec![PropertyDefinition::new(name.clone(), a.clone(), true)];
            let other = vec![PropertyDefinition::new(name, b.clone(), true)];
            let errors = compare_properties(&reference, &other, Platform::Ios, Platform::Web);

            if a == b {
                prop_assert!(errors.is_empty());
            } else {
                prop_assert_eq!(errors.len(), 1);
                prop_assert_eq!(errors[0].error_type, MismatchKind::TypeMismatch);
                prop_assert_eq!(&errors[0].expected, &a);
                prop_assert_eq!(&errors[0].actual, &b);
            }
        }

        /// Every comparator error names the reference platform first.
        #[test]
        fn errors_list_reference_first(
            reference in prop::collection::vec(method(), 0..4),
            other in prop::collection::vec(method(), 0..4),
        ) {
            let errors = compare_methods(&reference, &other, Platform::Android, Platform::Web);
            for error in errors {
                prop_assert_eq!(error.platforms, vec![Platform::Android, Platform::Web]);
            }
        }

        /// Validating the same input twice yields the same findings.
        #[test]
        fn validation_is_deterministic(
            a in definition(Platform::Ios),
            b in definition(Platform::Android),
        ) {
            let validator = InterfaceValidator::new();
            let defs = vec![a, b];
            let first = validator.validate_interfaces(&defs).unwrap();
            let second = validator.validate_interfaces(&defs).unwrap();

            prop_assert_eq!(first.valid, second.valid);
            prop_assert_eq!(&first.error_summary, &second.error_summary);
            for (x, y) in first.results.iter().zip(second.results.iter()) {
                prop_assert_eq!(&x.errors, &y.errors);
                prop_assert_eq!(&x.warnings, &y.warnings);
            }
        }
    }
}
