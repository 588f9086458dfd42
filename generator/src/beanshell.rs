//! BeanShell evaluator script emission.

use crate::ast::*;
use crate::chunk::{holder_name, holder_reference, ChunkCompiler};
use crate::error::GeneratorError;
use crate::literal::string_literal;
use crate::phase::EvaluationPhase;

const FRAMEWORK_IMPORTS: &[&str] = &[
    "net.sf.jasperreports.engine.*",
    "net.sf.jasperreports.engine.fill.*",
];

const JAVA_IMPORTS: &[&str] = &[
    "java.util.*",
    "java.math.*",
    "java.text.*",
    "java.io.*",
    "java.net.*",
];

/// Output structure for BeanShell generation
#[derive(Debug, Clone)]
pub struct BeanShellOutput {
    pub unit_name: String,
    pub header: String,
    pub declarations: String,
    pub init: String,
    /// Dispatch methods in Current, Old, Estimated order.
    pub methods: Vec<String>,
    pub trailer: String,
}

impl BeanShellOutput {
    pub fn full_script(&self) -> String {
        let mut script = String::new();
        script.push_str(&self.header);
        script.push_str(&self.declarations);
        script.push_str(&self.init);
        script.push_str("\n\n");
        for method in &self.methods {
            script.push_str(method);
        }
        script.push_str(&self.trailer);
        script
    }
}

/// Configuration for BeanShell generation
#[derive(Debug, Clone)]
pub struct BeanShellConfig {
    /// Tool name written in the generated banner.
    pub banner: String,
    /// Appended to the banner when set. The generator never reads the clock.
    pub generated_at: Option<String>,
}

impl Default for BeanShellConfig {
    fn default() -> Self {
        Self {
            banner: "ReportGen".to_string(),
            generated_at: None,
        }
    }
}

/// Emits the evaluator script for one generation context.
pub struct BeanShellGenerator<'a> {
    context: &'a GenerationContext,
    config: BeanShellConfig,
}

impl<'a> BeanShellGenerator<'a> {
    pub fn new(context: &'a GenerationContext) -> Self {
        Self {
            context,
            config: BeanShellConfig::default(),
        }
    }

    pub fn with_config(mut self, config: BeanShellConfig) -> Self {
        self.config = config;
        self
    }

    pub fn compile(&self) -> Result<BeanShellOutput, GeneratorError> {
        tracing::debug!(
            "Generating unit '{}': {} symbol(s), {} expression(s), single_phase={}",
            self.context.unit_name,
            self.context.symbol_count(),
            self.context.expressions.len(),
            self.context.single_phase
        );

        let methods = EvaluationPhase::ALL
            .into_iter()
            .map(|phase| self.generate_method(phase, self.expressions_for(phase)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(BeanShellOutput {
            unit_name: self.context.unit_name.clone(),
            header: self.generate_header(),
            declarations: self.generate_declarations(),
            init: self.generate_init(),
            methods,
            trailer: generate_trailer(),
        })
    }

    fn expressions_for(&self, phase: EvaluationPhase) -> &'a [Expression] {
        if phase != EvaluationPhase::Current && self.context.single_phase {
            if !self.context.expressions.is_empty() {
                tracing::warn!(
                    "Unit '{}' is single-phase, {} method emitted without cases",
                    self.context.unit_name,
                    phase.method_name()
                );
            }
            &[]
        } else {
            &self.context.expressions
        }
    }

    fn generate_header(&self) -> String {
        let mut out = String::new();

        out.push_str("//\n");
        out.push_str("// Generated by ");
        out.push_str(&self.config.banner);
        if let Some(generated_at) = &self.config.generated_at {
            out.push_str(" - ");
            out.push_str(generated_at);
        }
        out.push_str("\n//\n");

        for import in FRAMEWORK_IMPORTS {
            out.push_str(&format!("import {};\n", import));
        }
        out.push('\n');
        for import in JAVA_IMPORTS {
            out.push_str(&format!("import {};\n", import));
        }
        out.push('\n');
        for import in &self.context.imports {
            out.push_str(&format!("import {};\n", import));
        }

        out.push_str("\n\n");
        out.push_str("createBshEvaluator()\n");
        out.push_str("{\n");
        out.push_str("\n\n");
        out.push_str("    JREvaluator evaluator = null;\n");
        out.push('\n');
        out
    }

    fn generate_declarations(&self) -> String {
        let groups: Vec<String> = self
            .context
            .tables()
            .iter()
            .map(|table| {
                let kind = table.kind();
                table
                    .iter()
                    .map(|symbol| {
                        format!(
                            "    {} {} = null;\n",
                            kind.holder_type(),
                            holder_name(kind.holder_prefix(), &symbol.name)
                        )
                    })
                    .collect::<String>()
            })
            .collect();

        groups.join("\n")
    }

    fn generate_init(&self) -> String {
        let mut out = String::new();

        out.push_str("\n\n");
        out.push_str("    init(\n");
        out.push_str("        JREvaluator evaluator,\n");
        for kind in [SymbolKind::Parameter, SymbolKind::Field] {
            out.push_str(&format!("        Map {},\n", kind.init_map_name()));
        }
        out.push_str(&format!(
            "        Map {}\n",
            SymbolKind::Variable.init_map_name()
        ));
        out.push_str("        )\n");
        out.push_str("    {\n");
        out.push_str("        super.evaluator = evaluator;\n");
        out.push('\n');

        let groups: Vec<String> = self
            .context
            .tables()
            .iter()
            .map(|table| {
                let kind = table.kind();
                table
                    .iter()
                    .map(|symbol| {
                        format!(
                            "        {} = ({}){}.get({});\n",
                            holder_reference(kind.holder_prefix(), &symbol.name),
                            kind.holder_type(),
                            kind.init_map_name(),
                            string_literal(&symbol.name)
                        )
                    })
                    .collect::<String>()
            })
            .collect();
        out.push_str(&groups.join("\n"));

        out.push_str("    }\n");
        out
    }

    fn generate_method(
        &self,
        phase: EvaluationPhase,
        expressions: &[Expression],
    ) -> Result<String, GeneratorError> {
        let compiler = ChunkCompiler::new(self.context);
        let mut out = String::new();

        out.push_str(&format!("    Object {}(int id)\n", phase.method_name()));
        out.push_str("    {\n");
        out.push_str("        Object value = null;\n");
        out.push('\n');
        out.push_str("        switch (id)\n");
        out.push_str("        {\n");

        for expression in expressions {
            let compiled = compiler.compile_expression(expression, phase)?;

            out.push_str(&format!("            case {} :\n", compiled.id));
            out.push_str("            {\n");
            out.push_str(&format!(
                "                value = {};\n",
                compiled.cast_source()
            ));
            out.push_str("                break;\n");
            out.push_str("            }\n");
        }

        out.push_str("           default :\n");
        out.push_str("           {\n");
        out.push_str("           }\n");
        out.push_str("        }\n");
        out.push_str("        \n");
        out.push_str("        return value;\n");
        out.push_str("    }\n");
        out.push_str("\n\n");

        Ok(out)
    }
}

fn generate_trailer() -> String {
    let mut out = String::new();

    out.push('\n');
    out.push_str("    str(String key)\n");
    out.push_str("    {\n");
    out.push_str("        return super.evaluator.str(key);\n");
    out.push_str("    }\n");

    for arity in 1..=3 {
        let params: Vec<String> = (0..arity).map(|i| format!("Object arg{}", i)).collect();
        let args: Vec<String> = (0..arity).map(|i| format!("arg{}", i)).collect();

        out.push('\n');
        out.push_str(&format!("    msg(String pattern, {})\n", params.join(", ")));
        out.push_str("    {\n");
        out.push_str(&format!(
            "        return super.evaluator.msg(pattern, {});\n",
            args.join(", ")
        ));
        out.push_str("    }\n");
    }

    out.push('\n');
    out.push_str("    return this;\n");
    out.push_str("}\n");
    out
}

/// Generate the complete evaluator script for `context` with the default configuration.
pub fn generate(context: &GenerationContext) -> Result<String, GeneratorError> {
    generate_with_config(context, BeanShellConfig::default())
}

pub fn generate_with_config(
    context: &GenerationContext,
    config: BeanShellConfig,
) -> Result<String, GeneratorError> {
    let output = BeanShellGenerator::new(context)
        .with_config(config)
        .compile()?;
    Ok(output.full_script())
}

pub fn write_script_to_file(
    output: &BeanShellOutput,
    path: &std::path::Path,
) -> Result<(), std::io::Error> {
    std::fs::write(path, output.full_script())
}
