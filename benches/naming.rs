//! Benchmarks for project name resolution.
//!
//! These benchmarks measure literal macro substitution (member names) and
//! strict template expansion (cascade names) over token sets of growing size.

use std::collections::HashMap;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use layout_cascade::config::ModuleName;
use layout_cascade::naming::{
    module_tokens, replace_macro, TemplateExpander, TokenMacroExpander, Union, VariableResolver,
};

/// Template and variables with `count` braced tokens.
fn generate_template(count: usize) -> (String, HashMap<String, String>) {
    let mut template = String::new();
    let mut variables = HashMap::new();
    for i in 0..count {
        if i > 0 {
            template.push('-');
        }
        template.push_str(&format!("${{VAR_{}}}", i));
        variables.insert(format!("VAR_{}", i), format!("value{}", i));
    }
    (template, variables)
}

fn bench_member_names(c: &mut Criterion) {
    let mut group = c.benchmark_group("member_name");

    let tokens = module_tokens(&ModuleName::new("com.example.platform", "core-services"));
    let build = HashMap::from([
        ("BUILD_NUMBER".to_string(), "42".to_string()),
        ("GROUP_ID".to_string(), "shadowed".to_string()),
    ]);
    let union = Union::new(vec![&tokens as &dyn VariableResolver, &build]);

    group.bench_function("default_template", |b| {
        b.iter(|| replace_macro(black_box("${GROUP_ID}--${ARTIFACT_ID}"), &union))
    });

    group.bench_function("project_id_template", |b| {
        b.iter(|| replace_macro(black_box("${PROJECT_ID}-member"), &union))
    });

    group.bench_function("unresolved_tokens", |b| {
        b.iter(|| replace_macro(black_box("${UNKNOWN}-$ALSO_UNKNOWN-${ARTIFACT_ID}"), &union))
    });

    group.finish();
}

fn bench_template_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("template_scaling");

    for count in [1, 10, 50] {
        let (template, variables) = generate_template(count);

        group.bench_with_input(
            BenchmarkId::new("replace_macro", count),
            &template,
            |b, template| b.iter(|| replace_macro(black_box(template), &variables)),
        );

        group.bench_with_input(
            BenchmarkId::new("strict_expand", count),
            &template,
            |b, template| b.iter(|| TokenMacroExpander.expand(black_box(template), &variables)),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_member_names, bench_template_scaling);
criterion_main!(benches);
