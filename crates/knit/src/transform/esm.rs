//! ES module to CommonJS rewriting.
//!
//! The rewrite works on spans: top-level `import`/`export` statements are
//! removed or trimmed in place and every other byte of the source is carried
//! through untouched. What they declared moves into a prologue that runs
//! before the body:
//!
//! 1. an `Object.defineProperty` getter per exported name, so importers see
//!    later writes to `let`/`var` exports and cyclic importers see functions
//!    that are already declared;
//! 2. the `require` calls of every import and re-export, in source order, so
//!    dependencies evaluate before any statement of the importing module.
//!
//! Named and default imports become plain `var`s holding the value read when
//! the dependency finished evaluating. Namespace imports hold the exports
//! object itself and so stay live.

use std::path::Path;

use oxc_allocator::Allocator;
use oxc_ast::ast::{
    Argument, AwaitExpression, BindingPatternKind, CallExpression, Declaration,
    ExportAllDeclaration, ExportDefaultDeclaration, ExportDefaultDeclarationKind,
    ExportNamedDeclaration, Expression, ForOfStatement, FunctionBody, ImportDeclaration,
    ImportDeclarationSpecifier, JSXElement, JSXFragment, ModuleDeclaration, ModuleExportName,
    VariableDeclaration, VariableDeclarationKind,
};
use oxc_ast_visit::{Visit, walk};
use oxc_parser::Parser;
use oxc_span::{GetSpan, SourceType, Span};
use rustc_hash::FxHashSet;

use super::{TransformError, TransformedModule};

const USE_STRICT: &str = "\"use strict\";";
const ES_MODULE_MARKER: &str = "Object.defineProperty(exports, \"__esModule\", { value: true });";

const INTEROP_DEFAULT: &str = "function __knit_interopDefault(obj) { \
return obj && obj.__esModule ? obj : { \"default\": obj }; }";

const EXPORT_STAR: &str = "function __knit_exportStar(from, to) { \
Object.keys(from).forEach(function (key) { \
if (key === \"default\" || key === \"__esModule\") return; \
if (Object.prototype.hasOwnProperty.call(to, key)) return; \
Object.defineProperty(to, key, { enumerable: true, get: function () { return from[key]; } }); }); }";

/// Rewrite one JavaScript module to the CommonJS convention and collect the
/// import strings it will `require`.
///
/// Sources without module syntax pass through unchanged, so CommonJS files
/// bundle as written. Their string-literal `require` calls are still
/// collected as imports.
pub fn transform_source(path: &Path, source: &str) -> Result<TransformedModule, TransformError> {
    let source_type = source_type_for(path);
    if source_type.is_typescript() {
        return Err(TransformError::Unsupported {
            path: path.to_path_buf(),
            reason: "TypeScript must be compiled to JavaScript before bundling".to_string(),
        });
    }

    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, source, source_type).parse();

    if ret.panicked || !ret.errors.is_empty() {
        let message = if ret.errors.is_empty() {
            "parser aborted".to_string()
        } else {
            ret.errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ")
        };
        return Err(TransformError::Syntax {
            path: path.to_path_buf(),
            message,
        });
    }

    let program = ret.program;

    let mut collector = ImportCollector::default();
    collector.visit_program(&program);
    if let Some(span) = collector.jsx {
        return Err(TransformError::Unsupported {
            path: path.to_path_buf(),
            reason: format!(
                "JSX at byte {} must be compiled before bundling",
                span.start
            ),
        });
    }
    if let Some(span) = collector.top_level_await {
        return Err(TransformError::Unsupported {
            path: path.to_path_buf(),
            reason: format!(
                "top-level await at byte {} cannot run inside a synchronous module wrapper",
                span.start
            ),
        });
    }

    let mut rewriter = Rewriter::new(path, source);
    if let Some(hashbang) = &program.hashbang {
        rewriter.replace(hashbang.span, String::new());
    }
    for stmt in &program.body {
        if let Some(decl) = stmt.as_module_declaration() {
            rewriter.module_declaration(decl)?;
        }
    }

    Ok(TransformedModule {
        code: rewriter.finish(),
        imports: collector.imports,
    })
}

/// `.cjs` parses as a script. Everything else is a module, so `import` and
/// `export` are accepted in plain `.js` files.
fn source_type_for(path: &Path) -> SourceType {
    let source_type = SourceType::from_path(path).unwrap_or(SourceType::mjs());
    let is_cjs = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("cjs"));

    if is_cjs {
        source_type.with_module(false)
    } else {
        source_type.with_module(true)
    }
}

fn export_name(name: &ModuleExportName<'_>) -> String {
    match name {
        ModuleExportName::IdentifierName(ident) => ident.name.to_string(),
        ModuleExportName::IdentifierReference(ident) => ident.name.to_string(),
        ModuleExportName::StringLiteral(lit) => lit.value.to_string(),
    }
}

/// Quote `value` as a JavaScript string literal.
fn quote(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

/// Enumerable getter on `exports` named `name` that reads `value`.
fn export_getter(name: &str, value: &str) -> String {
    format!(
        "Object.defineProperty(exports, {}, {{ enumerable: true, get: function () {{ return {value}; }} }});",
        quote(name)
    )
}

/// Collects import strings in source order, plus the first construct the
/// wrapper cannot express.
#[derive(Default)]
struct ImportCollector {
    imports: Vec<String>,
    jsx: Option<Span>,
    top_level_await: Option<Span>,
    function_depth: u32,
}

impl ImportCollector {
    fn record_jsx(&mut self, span: Span) {
        if self.jsx.is_none() {
            self.jsx = Some(span);
        }
    }

    fn record_await(&mut self, span: Span) {
        if self.function_depth == 0 && self.top_level_await.is_none() {
            self.top_level_await = Some(span);
        }
    }
}

impl<'a> Visit<'a> for ImportCollector {
    fn visit_import_declaration(&mut self, decl: &ImportDeclaration<'a>) {
        self.imports.push(decl.source.value.to_string());
    }

    fn visit_export_named_declaration(&mut self, decl: &ExportNamedDeclaration<'a>) {
        if let Some(source) = &decl.source {
            self.imports.push(source.value.to_string());
        }
        walk::walk_export_named_declaration(self, decl);
    }

    fn visit_export_all_declaration(&mut self, decl: &ExportAllDeclaration<'a>) {
        self.imports.push(decl.source.value.to_string());
    }

    fn visit_call_expression(&mut self, call: &CallExpression<'a>) {
        if let Expression::Identifier(callee) = &call.callee {
            if callee.name.as_str() == "require" && call.arguments.len() == 1 {
                if let Some(Argument::StringLiteral(lit)) = call.arguments.first() {
                    self.imports.push(lit.value.to_string());
                }
            }
        }
        walk::walk_call_expression(self, call);
    }

    // Function and arrow bodies both land here.
    fn visit_function_body(&mut self, body: &FunctionBody<'a>) {
        self.function_depth += 1;
        walk::walk_function_body(self, body);
        self.function_depth -= 1;
    }

    fn visit_await_expression(&mut self, expr: &AwaitExpression<'a>) {
        self.record_await(expr.span);
        walk::walk_await_expression(self, expr);
    }

    fn visit_for_of_statement(&mut self, stmt: &ForOfStatement<'a>) {
        if stmt.r#await {
            self.record_await(stmt.span);
        }
        walk::walk_for_of_statement(self, stmt);
    }

    fn visit_variable_declaration(&mut self, decl: &VariableDeclaration<'a>) {
        if matches!(decl.kind, VariableDeclarationKind::AwaitUsing) {
            self.record_await(decl.span);
        }
        walk::walk_variable_declaration(self, decl);
    }

    fn visit_jsx_element(&mut self, element: &JSXElement<'a>) {
        self.record_jsx(element.span);
    }

    fn visit_jsx_fragment(&mut self, fragment: &JSXFragment<'a>) {
        self.record_jsx(fragment.span);
    }
}

/// Accumulates span replacements plus the prologue lines that run before
/// the rewritten body.
struct Rewriter<'s> {
    path: &'s Path,
    source: &'s str,
    edits: Vec<(Span, String)>,
    getters: Vec<String>,
    requires: Vec<String>,
    temps: FxHashSet<String>,
    is_module: bool,
    needs_interop: bool,
    needs_export_star: bool,
}

impl<'s> Rewriter<'s> {
    fn new(path: &'s Path, source: &'s str) -> Self {
        Self {
            path,
            source,
            edits: Vec::new(),
            getters: Vec::new(),
            requires: Vec::new(),
            temps: FxHashSet::default(),
            is_module: false,
            needs_interop: false,
            needs_export_star: false,
        }
    }

    fn text(&self, span: Span) -> &'s str {
        &self.source[span.start as usize..span.end as usize]
    }

    fn replace(&mut self, span: Span, replacement: String) {
        self.edits.push((span, replacement));
    }

    /// Drop the `export` / `export default` keywords in front of `inner`.
    fn strip_export_keyword(&mut self, export: Span, inner: Span) {
        self.replace(Span::new(export.start, inner.start), String::new());
    }

    fn export_local(&mut self, exported: &str, local: &str) {
        self.getters.push(export_getter(exported, local));
    }

    fn unsupported(&self, reason: impl Into<String>) -> TransformError {
        TransformError::Unsupported {
            path: self.path.to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Fresh binding name for the exports of `specifier`, e.g.
    /// `./lib/message.js` becomes `__knit_message`.
    fn temp_for(&mut self, specifier: &str) -> String {
        let segment = specifier
            .rsplit('/')
            .find(|part| !part.is_empty() && *part != "." && *part != "..")
            .unwrap_or("module");
        let stem = segment.split('.').next().unwrap_or(segment);
        let mut base: String = stem
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        if base.is_empty() {
            base.push_str("module");
        }

        let mut name = format!("__knit_{base}");
        let mut n = 1;
        while !self.temps.insert(name.clone()) {
            n += 1;
            name = format!("__knit_{base}{n}");
        }
        name
    }

    /// `__knit_interopDefault(temp)["default"]`
    fn default_of(&mut self, temp: &str) -> String {
        self.needs_interop = true;
        format!("__knit_interopDefault({temp})[\"default\"]")
    }

    fn module_declaration(&mut self, decl: &ModuleDeclaration<'_>) -> Result<(), TransformError> {
        self.is_module = true;
        match decl {
            ModuleDeclaration::ImportDeclaration(import) => self.import(import),
            ModuleDeclaration::ExportNamedDeclaration(export) => self.export_named(export),
            ModuleDeclaration::ExportDefaultDeclaration(export) => self.export_default(export),
            ModuleDeclaration::ExportAllDeclaration(export) => self.export_all(export),
            other => Err(self.unsupported(format!(
                "'{}' is TypeScript module syntax",
                self.text(other.span())
            ))),
        }
    }

    fn import(&mut self, import: &ImportDeclaration<'_>) -> Result<(), TransformError> {
        let specifier = import.source.value.as_str();
        let require = format!("require({})", quote(specifier));
        self.replace(import.span, String::new());

        let specifiers = match &import.specifiers {
            Some(specifiers) if !specifiers.is_empty() => specifiers,
            _ => {
                self.requires.push(format!("{require};"));
                return Ok(());
            }
        };

        let temp = self.temp_for(specifier);
        let mut out = format!("var {temp} = {require};");

        for spec in specifiers {
            let (local, value) = match spec {
                ImportDeclarationSpecifier::ImportDefaultSpecifier(default) => {
                    (&default.local.name, self.default_of(&temp))
                }
                ImportDeclarationSpecifier::ImportNamespaceSpecifier(namespace) => {
                    (&namespace.local.name, temp.clone())
                }
                ImportDeclarationSpecifier::ImportSpecifier(named) => {
                    let imported = export_name(&named.imported);
                    let value = if imported == "default" {
                        self.default_of(&temp)
                    } else {
                        format!("{temp}[{}]", quote(&imported))
                    };
                    (&named.local.name, value)
                }
            };
            out.push_str(&format!("\nvar {local} = {value};"));
        }

        self.requires.push(out);
        Ok(())
    }

    fn export_named(&mut self, export: &ExportNamedDeclaration<'_>) -> Result<(), TransformError> {
        if let Some(source) = &export.source {
            let specifier = source.value.as_str();
            let temp = self.temp_for(specifier);
            self.requires
                .push(format!("var {temp} = require({});", quote(specifier)));

            for spec in &export.specifiers {
                let local = export_name(&spec.local);
                let value = if local == "default" {
                    self.default_of(&temp)
                } else {
                    format!("{temp}[{}]", quote(&local))
                };
                self.getters
                    .push(export_getter(&export_name(&spec.exported), &value));
            }

            self.replace(export.span, String::new());
            return Ok(());
        }

        if let Some(declaration) = &export.declaration {
            return self.export_declaration(export.span, declaration);
        }

        for spec in &export.specifiers {
            let local = export_name(&spec.local);
            self.export_local(&export_name(&spec.exported), &local);
        }
        self.replace(export.span, String::new());
        Ok(())
    }

    fn export_declaration(
        &mut self,
        span: Span,
        declaration: &Declaration<'_>,
    ) -> Result<(), TransformError> {
        match declaration {
            Declaration::VariableDeclaration(var) => {
                for declarator in &var.declarations {
                    match &declarator.id.kind {
                        BindingPatternKind::BindingIdentifier(ident) => {
                            self.export_local(&ident.name, &ident.name);
                        }
                        _ => {
                            return Err(self.unsupported(
                                "destructuring patterns in export declarations",
                            ));
                        }
                    }
                }
            }
            Declaration::FunctionDeclaration(func) => {
                let Some(id) = &func.id else {
                    return Err(self.unsupported("exported function without a name"));
                };
                self.export_local(&id.name, &id.name);
            }
            Declaration::ClassDeclaration(class) => {
                let Some(id) = &class.id else {
                    return Err(self.unsupported("exported class without a name"));
                };
                self.export_local(&id.name, &id.name);
            }
            _ => return Err(self.unsupported("TypeScript declarations cannot be exported")),
        }

        self.strip_export_keyword(span, declaration.span());
        Ok(())
    }

    fn export_default(
        &mut self,
        export: &ExportDefaultDeclaration<'_>,
    ) -> Result<(), TransformError> {
        let named = match &export.declaration {
            ExportDefaultDeclarationKind::FunctionDeclaration(func) => {
                func.id.as_ref().map(|id| (id.name.as_str(), func.span))
            }
            ExportDefaultDeclarationKind::ClassDeclaration(class) => {
                class.id.as_ref().map(|id| (id.name.as_str(), class.span))
            }
            ExportDefaultDeclarationKind::TSInterfaceDeclaration(_) => {
                return Err(self.unsupported("TypeScript interfaces cannot be exported"));
            }
            _ => None,
        };

        match named {
            Some((local, inner)) => {
                self.export_local("default", local);
                self.strip_export_keyword(export.span, inner);
            }
            None => {
                let value = self.text(export.declaration.span());
                self.replace(export.span, format!("exports[\"default\"] = {value};"));
            }
        }
        Ok(())
    }

    fn export_all(&mut self, export: &ExportAllDeclaration<'_>) -> Result<(), TransformError> {
        let require = format!("require({})", quote(export.source.value.as_str()));

        let out = match &export.exported {
            Some(name) => format!("exports[{}] = {require};", quote(&export_name(name))),
            None => {
                self.needs_export_star = true;
                format!("__knit_exportStar({require}, exports);")
            }
        };

        self.requires.push(out);
        self.replace(export.span, String::new());
        Ok(())
    }

    fn finish(mut self) -> String {
        self.edits.sort_by_key(|(span, _)| span.start);

        let mut body = String::with_capacity(self.source.len());
        let mut cursor = 0usize;
        for (span, replacement) in &self.edits {
            body.push_str(&self.source[cursor..span.start as usize]);
            body.push_str(replacement);
            cursor = span.end as usize;
        }
        body.push_str(&self.source[cursor..]);

        if !self.is_module {
            return body;
        }

        let mut prologue = vec![USE_STRICT.to_string(), ES_MODULE_MARKER.to_string()];
        if self.needs_interop {
            prologue.push(INTEROP_DEFAULT.to_string());
        }
        if self.needs_export_star {
            prologue.push(EXPORT_STAR.to_string());
        }
        prologue.append(&mut self.getters);
        prologue.append(&mut self.requires);

        let mut out = prologue.join("\n");
        out.push('\n');
        out.push_str(&body);
        out
    }
}
