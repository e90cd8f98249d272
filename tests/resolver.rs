#[cfg(test)]
mod resolver_tests {
    use rox as lox;

    use lox::ast::{Expr, Stmt};
    use lox::parser::Parser;
    use lox::resolver::{Locals, Resolver};
    use lox::scanner::Scanner;

    /// Resolves `source` and returns the error messages (empty on success).
    fn resolve_errors(source: &str) -> Vec<String> {
        let (tokens, lex_errors) = Scanner::new(source).scan_all();
        assert!(lex_errors.is_empty());
        let (statements, parse_errors) = Parser::new(&tokens).parse();
        assert!(parse_errors.is_empty(), "{:?}", parse_errors);

        match Resolver::new().resolve(&statements) {
            Ok(_) => Vec::new(),
            Err(errors) => errors.iter().map(|e| e.to_string()).collect(),
        }
    }

    #[test]
    fn test_self_reference_in_initializer_at_top_level() {
        assert_eq!(
            resolve_errors("var a = a;"),
            vec!["[line 1] Error at 'a': Can't read local variable in its own initializer."]
        );
    }

    #[test]
    fn test_self_reference_in_initializer_in_block() {
        assert_eq!(
            resolve_errors("var a = 1; { var a = a + 1; }"),
            vec!["[line 1] Error at 'a': Can't read local variable in its own initializer."]
        );
    }

    #[test]
    fn test_global_redefinition_reading_previous_value_is_allowed() {
        assert!(resolve_errors("var a = 1; var a = a + 1;").is_empty());
    }

    #[test]
    fn test_duplicate_declaration_in_one_block() {
        assert_eq!(
            resolve_errors("{ var a = 1; var a = 2; }"),
            vec!["[line 1] Error at 'a': Already a variable with this name in this scope."]
        );
        assert_eq!(
            resolve_errors("fun f(x, x) {}"),
            vec!["[line 1] Error at 'x': Already a variable with this name in this scope."]
        );
    }

    #[test]
    fn test_return_outside_function() {
        assert_eq!(
            resolve_errors("return 1;"),
            vec!["[line 1] Error at 'return': Can't return from top-level code."]
        );
        assert!(resolve_errors("fun f() { return 1; }").is_empty());
        assert!(resolve_errors("class C { m() { return; } }").is_empty());
    }

    #[test]
    fn test_all_errors_are_collected() {
        let errors = resolve_errors("return;\n{ var b = b; }\n{ var c; var c; }");

        assert_eq!(errors.len(), 3);
        assert!(errors[0].starts_with("[line 1]"));
        assert!(errors[1].starts_with("[line 2]"));
        assert!(errors[2].starts_with("[line 3]"));
    }

    #[test]
    fn test_recursive_function_may_name_itself() {
        assert!(resolve_errors("{ fun fib(n) { if (n < 2) return n; return fib(n - 1) + fib(n - 2); } }")
            .is_empty());
    }

    /// Finds the hop count recorded for the first `print <name>;` inside
    /// nested blocks.
    fn depth_of_printed(statements: &[Stmt<'_>], locals: &Locals) -> Option<Option<usize>> {
        for stmt in statements {
            match stmt {
                Stmt::Print(Expr::Variable { id, .. }) => return Some(locals.get(*id)),
                Stmt::Block(inner) => {
                    if let Some(found) = depth_of_printed(inner, locals) {
                        return Some(found);
                    }
                }
                Stmt::Function(function) => {
                    if let Some(found) = depth_of_printed(&function.body, locals) {
                        return Some(found);
                    }
                }
                _ => {}
            }
        }
        None
    }

    #[test]
    fn test_hop_counts() {
        let cases: &[(&str, Option<usize>)] = &[
            ("var g; print g;", None),
            ("{ var a; print a; }", Some(0)),
            ("{ var a; { { print a; } } }", Some(2)),
            ("fun f(p) { { print p; } }", Some(1)),
            ("{ var a; fun f() { print a; } }", Some(1)),
        ];

        for (source, expected) in cases {
            let (tokens, _) = Scanner::new(source).scan_all();
            let (statements, _) = Parser::new(&tokens).parse();
            let locals = Resolver::new().resolve(&statements).expect("resolves");

            assert_eq!(
                depth_of_printed(&statements, &locals),
                Some(*expected),
                "source: {}",
                source
            );
        }
    }

    #[test]
    fn test_resolving_twice_yields_identical_table() {
        let source = "var x = 1; { var y = x; fun f(a) { y = a; return y; } { print f(y); } }";
        let (tokens, _) = Scanner::new(source).scan_all();
        let (statements, _) = Parser::new(&tokens).parse();

        let first = Resolver::new().resolve(&statements).expect("resolves");
        let second = Resolver::new().resolve(&statements).expect("resolves");

        assert!(!first.is_empty());
        assert_eq!(first, second);
    }
}
