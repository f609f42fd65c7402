//! Statement units.
//!
//! A statement renders as one or more lines, the first one indented to its
//! own nesting level, without a trailing newline. Bodies sit one level
//! deeper and end with a closing brace at the statement's level.

use super::lexemes;
use super::{AUTOMATIC_NESTING_LEVEL, CodeWriter, TranslationUnit, Unit, set_levels};

macro_rules! into_unit {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(impl From<$ty> for Unit {
            fn from(unit: $ty) -> Self {
                Unit::$variant(unit)
            }
        })*
    };
}

into_unit! {
    ExpressionStatementUnit => ExpressionStatement,
    VariableDeclarationUnit => VariableDeclaration,
    KeywordStatementUnit => Keyword,
    ConditionalStatementUnit => Conditional,
    ForStatementUnit => For,
    ForEachStatementUnit => ForEach,
    WhileStatementUnit => While,
    DoWhileStatementUnit => DoWhile,
    SwitchStatementUnit => Switch,
    TryStatementUnit => Try,
    BlockUnit => Block,
}

/// `expression;`
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatementUnit {
    expression: Box<Unit>,
    level: usize,
}

impl ExpressionStatementUnit {
    pub fn create(expression: Unit) -> Self {
        Self {
            expression: Box::new(expression),
            level: AUTOMATIC_NESTING_LEVEL,
        }
    }
}

impl TranslationUnit for ExpressionStatementUnit {
    fn translate(&self) -> String {
        let mut writer = CodeWriter::new();
        writer.write_indent(self.level);
        writer.write(&self.expression.translate());
        writer.write(";");
        writer.finish()
    }

    fn nesting_level(&self) -> usize {
        self.level
    }

    fn set_nesting_level(&mut self, level: usize) {
        self.level = level;
        self.expression.set_nesting_level(level);
    }

    fn inner_units(&self) -> Vec<&Unit> {
        vec![self.expression.as_ref()]
    }
}

/// One `name[ = initializer]` of a variable declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclaratorUnit {
    pub name: String,
    pub initializer: Option<Unit>,
}

/// `let a: T = 1, b: T;`
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclarationUnit {
    ty: Option<String>,
    declarators: Vec<DeclaratorUnit>,
    level: usize,
}

impl VariableDeclarationUnit {
    /// `ty` is `None` for implicitly typed (`var`) declarations.
    pub fn create(ty: Option<String>) -> Self {
        Self {
            ty,
            declarators: Vec::new(),
            level: AUTOMATIC_NESTING_LEVEL,
        }
    }

    pub fn add_declarator(&mut self, name: impl Into<String>, initializer: Option<Unit>) {
        let initializer = initializer.map(|mut unit| {
            unit.set_nesting_level(self.level);
            unit
        });
        self.declarators.push(DeclaratorUnit {
            name: name.into(),
            initializer,
        });
    }

    /// Declaration without indentation or terminator, as in a `for` header.
    pub fn render_inline(&self) -> String {
        let mut out = String::from(lexemes::LET_KEYWORD);
        out.push(' ');
        for (i, declarator) in self.declarators.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&declarator.name);
            if let Some(ty) = &self.ty {
                out.push_str(": ");
                out.push_str(ty);
            }
            if let Some(initializer) = &declarator.initializer {
                out.push_str(" = ");
                out.push_str(&initializer.translate());
            }
        }
        out
    }
}

impl TranslationUnit for VariableDeclarationUnit {
    fn translate(&self) -> String {
        let mut writer = CodeWriter::new();
        writer.write_indent(self.level);
        writer.write(&self.render_inline());
        writer.write(";");
        writer.finish()
    }

    fn nesting_level(&self) -> usize {
        self.level
    }

    fn set_nesting_level(&mut self, level: usize) {
        self.level = level;
        for declarator in &mut self.declarators {
            if let Some(initializer) = &mut declarator.initializer {
                initializer.set_nesting_level(level);
            }
        }
    }

    fn inner_units(&self) -> Vec<&Unit> {
        self.declarators
            .iter()
            .filter_map(|d| d.initializer.as_ref())
            .collect()
    }
}

/// A keyword statement with an optional operand: `return`, `throw`,
/// `break`, `continue`.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordStatementUnit {
    keyword: &'static str,
    expression: Option<Box<Unit>>,
    level: usize,
}

impl KeywordStatementUnit {
    pub fn create(keyword: &'static str, expression: Option<Unit>) -> Self {
        Self {
            keyword,
            expression: expression.map(Box::new),
            level: AUTOMATIC_NESTING_LEVEL,
        }
    }

    pub fn keyword(&self) -> &str {
        self.keyword
    }
}

impl TranslationUnit for KeywordStatementUnit {
    fn translate(&self) -> String {
        let mut writer = CodeWriter::new();
        writer.write_indent(self.level);
        writer.write(self.keyword);
        if let Some(expression) = &self.expression {
            writer.write(" ");
            writer.write(&expression.translate());
        }
        writer.write(";");
        writer.finish()
    }

    fn nesting_level(&self) -> usize {
        self.level
    }

    fn set_nesting_level(&mut self, level: usize) {
        self.level = level;
        if let Some(expression) = &mut self.expression {
            expression.set_nesting_level(level);
        }
    }

    fn inner_units(&self) -> Vec<&Unit> {
        self.expression.as_deref().into_iter().collect()
    }
}

/// What follows the `then` block of an `if`.
#[derive(Debug, Clone, PartialEq)]
pub enum ElseBranch {
    /// `else if (...) { ... }`
    If(Box<ConditionalStatementUnit>),
    /// `else { ... }`
    Else(Vec<Unit>),
}

/// `if (condition) { ... } else ...`
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalStatementUnit {
    condition: Box<Unit>,
    body: Vec<Unit>,
    otherwise: Option<ElseBranch>,
    level: usize,
}

impl ConditionalStatementUnit {
    pub fn create(condition: Unit) -> Self {
        Self {
            condition: Box::new(condition),
            body: Vec::new(),
            otherwise: None,
            level: AUTOMATIC_NESTING_LEVEL,
        }
    }

    pub fn add_statement(&mut self, mut statement: Unit) {
        statement.set_nesting_level(self.level + 1);
        self.body.push(statement);
    }

    pub fn set_else(&mut self, mut branch: ElseBranch) {
        match &mut branch {
            ElseBranch::If(nested) => nested.set_nesting_level(self.level),
            ElseBranch::Else(body) => set_levels(body, self.level + 1),
        }
        self.otherwise = Some(branch);
    }

    /// Render without leading indentation; `else if` chains continue on
    /// the closing-brace line.
    fn render_chain(&self, writer: &mut CodeWriter) {
        writer.write("if (");
        writer.write(&self.condition.translate());
        writer.write(") {");
        writer.write_body(&self.body, self.level);
        match &self.otherwise {
            Some(ElseBranch::If(nested)) => {
                writer.write(" else ");
                nested.render_chain(writer);
            }
            Some(ElseBranch::Else(body)) => {
                writer.write(" else {");
                writer.write_body(body, self.level);
            }
            None => {}
        }
    }
}

impl TranslationUnit for ConditionalStatementUnit {
    fn translate(&self) -> String {
        let mut writer = CodeWriter::new();
        writer.write_indent(self.level);
        self.render_chain(&mut writer);
        writer.finish()
    }

    fn nesting_level(&self) -> usize {
        self.level
    }

    fn set_nesting_level(&mut self, level: usize) {
        self.level = level;
        self.condition.set_nesting_level(level);
        set_levels(&mut self.body, level + 1);
        match &mut self.otherwise {
            Some(ElseBranch::If(nested)) => nested.set_nesting_level(level),
            Some(ElseBranch::Else(body)) => set_levels(body, level + 1),
            None => {}
        }
    }

    fn inner_units(&self) -> Vec<&Unit> {
        let mut units: Vec<&Unit> = vec![self.condition.as_ref()];
        units.extend(self.body.iter());
        match &self.otherwise {
            Some(ElseBranch::If(nested)) => units.extend(nested.inner_units()),
            Some(ElseBranch::Else(body)) => units.extend(body.iter()),
            None => {}
        }
        units
    }
}

/// Header of a `for` statement.
#[derive(Debug, Clone, PartialEq)]
pub enum ForHeader {
    /// `for (let variable of condition)`: a loop that only carries a
    /// condition walks that condition as a collection.
    CollectionWalk(Box<Unit>),
    /// `for (init; condition; incrementors)`
    Classic {
        declaration: Option<VariableDeclarationUnit>,
        initializers: Vec<Unit>,
        condition: Option<Box<Unit>>,
        incrementors: Vec<Unit>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStatementUnit {
    header: ForHeader,
    body: Vec<Unit>,
    level: usize,
}

impl ForStatementUnit {
    pub fn collection_walk(condition: Unit) -> Self {
        Self::create(ForHeader::CollectionWalk(Box::new(condition)))
    }

    pub fn create(header: ForHeader) -> Self {
        Self {
            header,
            body: Vec::new(),
            level: AUTOMATIC_NESTING_LEVEL,
        }
    }

    pub fn add_statement(&mut self, mut statement: Unit) {
        statement.set_nesting_level(self.level + 1);
        self.body.push(statement);
    }

    fn render_header(&self, writer: &mut CodeWriter) {
        match &self.header {
            ForHeader::CollectionWalk(condition) => {
                writer.write("for (");
                writer.write(lexemes::LET_KEYWORD);
                writer.write(" ");
                writer.write(lexemes::FOR_OF_VARIABLE);
                writer.write(" of ");
                writer.write(&condition.translate());
                writer.write(")");
            }
            ForHeader::Classic {
                declaration,
                initializers,
                condition,
                incrementors,
            } => {
                writer.write("for (");
                match declaration {
                    Some(declaration) => writer.write(&declaration.render_inline()),
                    None => writer.write_joined(initializers, ", "),
                }
                writer.write(";");
                if let Some(condition) = condition {
                    writer.write(" ");
                    writer.write(&condition.translate());
                }
                writer.write(";");
                if !incrementors.is_empty() {
                    writer.write(" ");
                    writer.write_joined(incrementors, ", ");
                }
                writer.write(")");
            }
        }
    }
}

impl TranslationUnit for ForStatementUnit {
    fn translate(&self) -> String {
        let mut writer = CodeWriter::new();
        writer.write_indent(self.level);
        self.render_header(&mut writer);
        writer.write(" {");
        writer.write_body(&self.body, self.level);
        writer.finish()
    }

    fn nesting_level(&self) -> usize {
        self.level
    }

    fn set_nesting_level(&mut self, level: usize) {
        self.level = level;
        match &mut self.header {
            ForHeader::CollectionWalk(condition) => condition.set_nesting_level(level),
            ForHeader::Classic {
                declaration,
                initializers,
                condition,
                incrementors,
            } => {
                if let Some(declaration) = declaration {
                    declaration.set_nesting_level(level);
                }
                set_levels(initializers, level);
                if let Some(condition) = condition {
                    condition.set_nesting_level(level);
                }
                set_levels(incrementors, level);
            }
        }
        set_levels(&mut self.body, level + 1);
    }

    fn inner_units(&self) -> Vec<&Unit> {
        let mut units: Vec<&Unit> = Vec::new();
        match &self.header {
            ForHeader::CollectionWalk(condition) => units.push(condition),
            ForHeader::Classic {
                declaration,
                initializers,
                condition,
                incrementors,
            } => {
                if let Some(declaration) = declaration {
                    units.extend(declaration.inner_units());
                }
                units.extend(initializers.iter());
                units.extend(condition.as_deref());
                units.extend(incrementors.iter());
            }
        }
        units.extend(self.body.iter());
        units
    }
}

/// `collection.forEach((item: T) => { ... });`
#[derive(Debug, Clone, PartialEq)]
pub struct ForEachStatementUnit {
    variable: String,
    ty: Option<String>,
    collection: String,
    body: Vec<Unit>,
    level: usize,
}

impl ForEachStatementUnit {
    pub fn create(ty: Option<String>, variable: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            ty,
            collection: collection.into(),
            body: Vec::new(),
            level: AUTOMATIC_NESTING_LEVEL,
        }
    }

    pub fn add_statement(&mut self, mut statement: Unit) {
        statement.set_nesting_level(self.level + 1);
        self.body.push(statement);
    }
}

impl TranslationUnit for ForEachStatementUnit {
    fn translate(&self) -> String {
        let mut writer = CodeWriter::new();
        writer.write_indent(self.level);
        writer.write(&self.collection);
        writer.write(".forEach((");
        writer.write(&self.variable);
        if let Some(ty) = &self.ty {
            writer.write(": ");
            writer.write(ty);
        }
        writer.write(") => {");
        writer.write_body(&self.body, self.level);
        writer.write(");");
        writer.finish()
    }

    fn nesting_level(&self) -> usize {
        self.level
    }

    fn set_nesting_level(&mut self, level: usize) {
        self.level = level;
        set_levels(&mut self.body, level + 1);
    }

    fn inner_units(&self) -> Vec<&Unit> {
        self.body.iter().collect()
    }
}

/// `while (condition) { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct WhileStatementUnit {
    condition: Box<Unit>,
    body: Vec<Unit>,
    level: usize,
}

impl WhileStatementUnit {
    pub fn create(condition: Unit) -> Self {
        Self {
            condition: Box::new(condition),
            body: Vec::new(),
            level: AUTOMATIC_NESTING_LEVEL,
        }
    }

    pub fn add_statement(&mut self, mut statement: Unit) {
        statement.set_nesting_level(self.level + 1);
        self.body.push(statement);
    }
}

impl TranslationUnit for WhileStatementUnit {
    fn translate(&self) -> String {
        let mut writer = CodeWriter::new();
        writer.write_indent(self.level);
        writer.write("while (");
        writer.write(&self.condition.translate());
        writer.write(") {");
        writer.write_body(&self.body, self.level);
        writer.finish()
    }

    fn nesting_level(&self) -> usize {
        self.level
    }

    fn set_nesting_level(&mut self, level: usize) {
        self.level = level;
        self.condition.set_nesting_level(level);
        set_levels(&mut self.body, level + 1);
    }

    fn inner_units(&self) -> Vec<&Unit> {
        std::iter::once(self.condition.as_ref())
            .chain(self.body.iter())
            .collect()
    }
}

/// `do { ... } while (condition);`
#[derive(Debug, Clone, PartialEq)]
pub struct DoWhileStatementUnit {
    condition: Box<Unit>,
    body: Vec<Unit>,
    level: usize,
}

impl DoWhileStatementUnit {
    pub fn create(condition: Unit) -> Self {
        Self {
            condition: Box::new(condition),
            body: Vec::new(),
            level: AUTOMATIC_NESTING_LEVEL,
        }
    }

    pub fn add_statement(&mut self, mut statement: Unit) {
        statement.set_nesting_level(self.level + 1);
        self.body.push(statement);
    }
}

impl TranslationUnit for DoWhileStatementUnit {
    fn translate(&self) -> String {
        let mut writer = CodeWriter::new();
        writer.write_indent(self.level);
        writer.write("do {");
        writer.write_body(&self.body, self.level);
        writer.write(" while (");
        writer.write(&self.condition.translate());
        writer.write(");");
        writer.finish()
    }

    fn nesting_level(&self) -> usize {
        self.level
    }

    fn set_nesting_level(&mut self, level: usize) {
        self.level = level;
        self.condition.set_nesting_level(level);
        set_levels(&mut self.body, level + 1);
    }

    fn inner_units(&self) -> Vec<&Unit> {
        self.body
            .iter()
            .chain(std::iter::once(self.condition.as_ref()))
            .collect()
    }
}

/// One `case`/`default` group of a switch. Labels sit one level below the
/// `switch`, statements two.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchSectionUnit {
    /// `None` is the `default` label.
    labels: Vec<Option<Unit>>,
    statements: Vec<Unit>,
    level: usize,
}

impl SwitchSectionUnit {
    pub fn create() -> Self {
        Self {
            labels: Vec::new(),
            statements: Vec::new(),
            level: AUTOMATIC_NESTING_LEVEL,
        }
    }

    pub fn add_case(&mut self, mut label: Unit) {
        label.set_nesting_level(self.level);
        self.labels.push(Some(label));
    }

    pub fn add_default(&mut self) {
        self.labels.push(None);
    }

    pub fn add_statement(&mut self, mut statement: Unit) {
        statement.set_nesting_level(self.level + 1);
        self.statements.push(statement);
    }

    fn set_nesting_level(&mut self, level: usize) {
        self.level = level;
        for label in self.labels.iter_mut().flatten() {
            label.set_nesting_level(level);
        }
        set_levels(&mut self.statements, level + 1);
    }

    fn render(&self, writer: &mut CodeWriter) {
        for label in &self.labels {
            writer.write("\n");
            writer.write_indent(self.level);
            match label {
                Some(label) => {
                    writer.write("case ");
                    writer.write(&label.translate());
                    writer.write(":");
                }
                None => writer.write("default:"),
            }
        }
        writer.write_lines(&self.statements);
    }
}

impl Default for SwitchSectionUnit {
    fn default() -> Self {
        Self::create()
    }
}

/// `switch (expression) { sections }`
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchStatementUnit {
    expression: Box<Unit>,
    sections: Vec<SwitchSectionUnit>,
    level: usize,
}

impl SwitchStatementUnit {
    pub fn create(expression: Unit) -> Self {
        Self {
            expression: Box::new(expression),
            sections: Vec::new(),
            level: AUTOMATIC_NESTING_LEVEL,
        }
    }

    pub fn add_section(&mut self, mut section: SwitchSectionUnit) {
        section.set_nesting_level(self.level + 1);
        self.sections.push(section);
    }
}

impl TranslationUnit for SwitchStatementUnit {
    fn translate(&self) -> String {
        let mut writer = CodeWriter::new();
        writer.write_indent(self.level);
        writer.write("switch (");
        writer.write(&self.expression.translate());
        writer.write(") {");
        for section in &self.sections {
            section.render(&mut writer);
        }
        writer.write("\n");
        writer.write_indent(self.level);
        writer.write("}");
        writer.finish()
    }

    fn nesting_level(&self) -> usize {
        self.level
    }

    fn set_nesting_level(&mut self, level: usize) {
        self.level = level;
        self.expression.set_nesting_level(level);
        for section in &mut self.sections {
            section.set_nesting_level(level + 1);
        }
    }

    fn inner_units(&self) -> Vec<&Unit> {
        let mut units: Vec<&Unit> = vec![self.expression.as_ref()];
        for section in &self.sections {
            units.extend(section.labels.iter().flatten());
            units.extend(section.statements.iter());
        }
        units
    }
}

/// `catch (name) { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct CatchUnit {
    pub variable: Option<String>,
    pub body: Vec<Unit>,
}

/// `try { ... } catch (e) { ... } finally { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct TryStatementUnit {
    body: Vec<Unit>,
    catches: Vec<CatchUnit>,
    finally: Option<Vec<Unit>>,
    level: usize,
}

impl TryStatementUnit {
    pub fn create() -> Self {
        Self {
            body: Vec::new(),
            catches: Vec::new(),
            finally: None,
            level: AUTOMATIC_NESTING_LEVEL,
        }
    }

    pub fn add_statement(&mut self, mut statement: Unit) {
        statement.set_nesting_level(self.level + 1);
        self.body.push(statement);
    }

    pub fn add_catch(&mut self, mut catch: CatchUnit) {
        set_levels(&mut catch.body, self.level + 1);
        self.catches.push(catch);
    }

    pub fn set_finally(&mut self, mut body: Vec<Unit>) {
        set_levels(&mut body, self.level + 1);
        self.finally = Some(body);
    }
}

impl Default for TryStatementUnit {
    fn default() -> Self {
        Self::create()
    }
}

impl TranslationUnit for TryStatementUnit {
    fn translate(&self) -> String {
        let mut writer = CodeWriter::new();
        writer.write_indent(self.level);
        writer.write("try {");
        writer.write_body(&self.body, self.level);
        for catch in &self.catches {
            match &catch.variable {
                Some(variable) => {
                    writer.write(" catch (");
                    writer.write(variable);
                    writer.write(") {");
                }
                None => writer.write(" catch {"),
            }
            writer.write_body(&catch.body, self.level);
        }
        if let Some(finally) = &self.finally {
            writer.write(" finally {");
            writer.write_body(finally, self.level);
        }
        writer.finish()
    }

    fn nesting_level(&self) -> usize {
        self.level
    }

    fn set_nesting_level(&mut self, level: usize) {
        self.level = level;
        set_levels(&mut self.body, level + 1);
        for catch in &mut self.catches {
            set_levels(&mut catch.body, level + 1);
        }
        if let Some(finally) = &mut self.finally {
            set_levels(finally, level + 1);
        }
    }

    fn inner_units(&self) -> Vec<&Unit> {
        let mut units: Vec<&Unit> = self.body.iter().collect();
        for catch in &self.catches {
            units.extend(catch.body.iter());
        }
        if let Some(finally) = &self.finally {
            units.extend(finally.iter());
        }
        units
    }
}

/// A nested `{ ... }` block statement.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockUnit {
    statements: Vec<Unit>,
    level: usize,
}

impl BlockUnit {
    pub fn create() -> Self {
        Self {
            statements: Vec::new(),
            level: AUTOMATIC_NESTING_LEVEL,
        }
    }

    pub fn add_statement(&mut self, mut statement: Unit) {
        statement.set_nesting_level(self.level + 1);
        self.statements.push(statement);
    }

    pub fn statements(&self) -> &[Unit] {
        &self.statements
    }

    pub fn into_statements(self) -> Vec<Unit> {
        self.statements
    }
}

impl Default for BlockUnit {
    fn default() -> Self {
        Self::create()
    }
}

impl TranslationUnit for BlockUnit {
    fn translate(&self) -> String {
        let mut writer = CodeWriter::new();
        writer.write_indent(self.level);
        writer.write("{");
        writer.write_body(&self.statements, self.level);
        writer.finish()
    }

    fn nesting_level(&self) -> usize {
        self.level
    }

    fn set_nesting_level(&mut self, level: usize) {
        self.level = level;
        set_levels(&mut self.statements, level + 1);
    }

    fn inner_units(&self) -> Vec<&Unit> {
        self.statements.iter().collect()
    }
}
