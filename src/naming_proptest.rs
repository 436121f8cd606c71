//! Property-based tests for name template substitution.

#[cfg(test)]
mod proptest_tests {
    use std::collections::HashMap;

    use crate::config::ModuleName;
    use crate::naming::{
        module_tokens, replace_macro, ExpansionError, TemplateExpander, TokenMacroExpander,
    };
    use proptest::prelude::*;

    // ============================================================================
    // replace_macro property tests
    // ============================================================================

    proptest! {
        /// Property: with no variables, every token is kept verbatim
        #[test]
        fn replace_macro_keeps_unresolved_tokens(input in ".*") {
            let result = replace_macro(&input, &HashMap::<String, String>::new()).unwrap();
            prop_assert_eq!(result, input);
        }

        /// Property: the member template always embeds the qualified name
        #[test]
        fn project_id_token_resolves_to_qualified_name(
            group in "[a-z][a-z0-9.]{0,12}",
            artifact in "[a-z][a-z0-9-]{0,12}",
        ) {
            let name = ModuleName::new(group.clone(), artifact.clone());
            let tokens = module_tokens(&name);
            let result = replace_macro("${PROJECT_ID}-member", &tokens).unwrap();
            prop_assert_eq!(result, format!("{}:{}-member", group, artifact));
        }

        /// Property: substituted values are never re-expanded
        #[test]
        fn replacement_values_are_literal(value in "\\$\\{[A-Z]{1,6}\\}") {
            let variables = HashMap::from([("A".to_string(), value.clone())]);
            let result = replace_macro("${A}", &variables).unwrap();
            prop_assert_eq!(result, value);
        }
    }

    // ============================================================================
    // TokenMacroExpander property tests
    // ============================================================================

    proptest! {
        /// Property: strict and literal expansion agree once every braced token resolves
        #[test]
        fn strict_agrees_with_literal_when_resolved(
            names in proptest::collection::vec("[A-Z][A-Z0-9_]{0,6}", 1..4),
            value in "[a-z0-9-]{0,8}",
        ) {
            let variables: HashMap<String, String> = names
                .iter()
                .map(|name| (name.clone(), value.clone()))
                .collect();
            let template = names
                .iter()
                .map(|name| format!("${{{}}}", name))
                .collect::<Vec<_>>()
                .join("-");
            prop_assert_eq!(
                TokenMacroExpander.expand(&template, &variables).unwrap(),
                replace_macro(&template, &variables).unwrap()
            );
        }

        /// Property: an unresolved braced token always fails strict expansion
        #[test]
        fn strict_rejects_unresolved(name in "[A-Z][A-Z0-9_]{0,8}") {
            let template = format!("prefix-${{{}}}", name);
            let err = TokenMacroExpander.expand(&template, &HashMap::<String, String>::new()).unwrap_err();
            prop_assert_eq!(err, ExpansionError::UnknownToken { token: name });
        }
    }
}
