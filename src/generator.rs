//! # Query Generation
//!
//! One engine serves every entity. Each entity supplies a static
//! [`EntityConfig`] describing its table, the exhaustive list of columns it
//! may expose, renames, derived expressions, sortable fields and the filters
//! it accepts. Finders combine the pieces through [`QueryGenerator`]:
//!
//! 1. required parameters and every present filter are validated, in
//!    declaration order, before anything is built;
//! 2. each present filter becomes one [`Clause`], AND-joined;
//! 3. ORDER BY and `LIMIT :starting, :limit` are appended.
//!
//! A [`PreparedQuery`] can only be obtained from
//! [`SelectBuilder::paginate`], so a failed finder never leaks a half-built
//! statement.

use crate::filtering::{
    Clause, Ordering, apply_limit, boolean_flag, content_presence, equals, in_list, parse_sorting,
    range,
};
use crate::params::ParameterSet;
use crate::query::{BindMap, BindValue, PreparedQuery};
use crate::validation::{ValidationError, validators};

/// Placeholder names used by finders and pagination; filter suffixes must
/// not reuse them.
const RESERVED_PLACEHOLDERS: [&str; 6] = ["id", "country", "month", "day", "starting", "limit"];

/// Piece of a derived CONCAT expression.
#[derive(Debug)]
pub enum Part {
    Text(&'static str),
    Column(&'static str),
}

/// A computed select expression.
#[derive(Debug)]
pub enum Derived {
    /// Five-bucket progress label for a numeric scale column.
    ScaleText {
        column: &'static str,
        alias: &'static str,
    },
    /// String concatenation, used for canonical URLs.
    Concat {
        parts: &'static [Part],
        alias: &'static str,
    },
}

impl Derived {
    #[must_use]
    pub fn alias(&self) -> &'static str {
        match self {
            Self::ScaleText { alias, .. } | Self::Concat { alias, .. } => *alias,
        }
    }

    fn source_columns(&self) -> Vec<&'static str> {
        match self {
            Self::ScaleText { column, .. } => vec![*column],
            Self::Concat { parts, .. } => parts
                .iter()
                .filter_map(|part| match part {
                    Part::Column(column) => Some(*column),
                    Part::Text(_) => None,
                })
                .collect(),
        }
    }

    fn to_sql(&self) -> String {
        match self {
            Self::ScaleText { column, alias } => format!(
                "CASE WHEN `{column}` = 1 THEN 'Unreached' \
                 WHEN `{column}` = 2 THEN 'Minimally Reached' \
                 WHEN `{column}` = 3 THEN 'Superficially Reached' \
                 WHEN `{column}` = 4 THEN 'Partially Reached' \
                 ELSE 'Significantly Reached' END AS {alias}"
            ),
            Self::Concat { parts, alias } => {
                let args: Vec<String> = parts
                    .iter()
                    .map(|part| match part {
                        Part::Text(text) => format!("'{}'", text.replace('\'', "''")),
                        Part::Column(column) => format!("`{column}`"),
                    })
                    .collect();
                format!("CONCAT({}) AS {alias}", args.join(", "))
            }
        }
    }
}

/// Which clause builder a filter uses.
#[derive(Debug, Clone, Copy)]
pub enum ClauseKind {
    InList,
    Range { suffix: &'static str },
    Flag { suffix: &'static str },
    Presence,
}

/// Per-filter precondition, applied to every `|` separated part.
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    LengthEach(usize),
    IntegerEach,
    IntRangeEach {
        min: i64,
        max: i64,
        except: &'static [i64],
    },
    MembershipEach(&'static [&'static str]),
}

impl Rule {
    fn check(&self, field: &str, value: &str) -> Result<(), ValidationError> {
        match self {
            Self::LengthEach(length) => {
                validators::require_length_for_each_delimited(field, value, *length)
            }
            Self::IntegerEach => value
                .split('|')
                .try_for_each(|part| validators::require_integer(field, part).map(|_| ())),
            Self::IntRangeEach { min, max, except } => value.split('|').try_for_each(|part| {
                let number = validators::require_integer(field, part)?;
                validators::require_in_range(field, number, *min, *max, except)
            }),
            Self::MembershipEach(allowed) => validators::require_membership(field, value, allowed),
        }
    }
}

/// One optional filter parameter of a list finder.
#[derive(Debug)]
pub struct FilterSpec {
    pub param: &'static str,
    pub column: &'static str,
    pub kind: ClauseKind,
    pub rules: &'static [Rule],
}

impl FilterSpec {
    #[must_use]
    pub const fn in_list(
        param: &'static str,
        column: &'static str,
        rules: &'static [Rule],
    ) -> Self {
        Self {
            param,
            column,
            kind: ClauseKind::InList,
            rules,
        }
    }

    #[must_use]
    pub const fn range(param: &'static str, column: &'static str, suffix: &'static str) -> Self {
        Self {
            param,
            column,
            kind: ClauseKind::Range { suffix },
            rules: &[],
        }
    }

    #[must_use]
    pub const fn flag(param: &'static str, column: &'static str, suffix: &'static str) -> Self {
        Self {
            param,
            column,
            kind: ClauseKind::Flag { suffix },
            rules: &[],
        }
    }

    #[must_use]
    pub const fn presence(param: &'static str, column: &'static str) -> Self {
        Self {
            param,
            column,
            kind: ClauseKind::Presence,
            rules: &[],
        }
    }

    fn validate(&self, value: &str) -> Result<(), ValidationError> {
        self.rules
            .iter()
            .try_for_each(|rule| rule.check(self.param, value))
    }

    fn build(&self, value: &str) -> Result<Clause, ValidationError> {
        let clause = match self.kind {
            ClauseKind::InList => Ok(in_list(value, self.column)),
            ClauseKind::Range { suffix } => range(value, self.column, suffix),
            ClauseKind::Flag { suffix } => boolean_flag(value, self.column, suffix),
            ClauseKind::Presence => content_presence(value, self.column),
        };
        clause.map_err(|err| ValidationError::new(self.param, err.message))
    }

    fn suffix(&self) -> Option<&'static str> {
        match self.kind {
            ClauseKind::Range { suffix } | ClauseKind::Flag { suffix } => Some(suffix),
            ClauseKind::InList | ClauseKind::Presence => None,
        }
    }
}

/// Static description of one entity's table and query surface.
#[derive(Debug)]
pub struct EntityConfig {
    /// Singular name used in error messages.
    pub resource: &'static str,
    pub table: &'static str,
    /// Every column that may ever be selected. Nothing else is.
    pub columns: &'static [&'static str],
    /// `(raw column, output alias)` renames.
    pub aliases: &'static [(&'static str, &'static str)],
    pub derived: &'static [Derived],
    pub default_order: &'static str,
    /// `(sort_field value, column)` allow-list.
    pub sortable: &'static [(&'static str, &'static str)],
    pub filters: &'static [FilterSpec],
    pub default_limit: i64,
}

impl EntityConfig {
    #[must_use]
    pub fn is_whitelisted(&self, column: &str) -> bool {
        self.columns.contains(&column)
    }

    fn alias_for(&self, column: &str) -> Option<&'static str> {
        self.aliases
            .iter()
            .find(|(raw, _)| *raw == column)
            .map(|(_, alias)| *alias)
    }

    fn column_sql(&self, column: &str) -> String {
        match self.alias_for(column) {
            Some(alias) => format!("`{column}` AS {alias}"),
            None => format!("`{column}`"),
        }
    }

    /// The full select list: every whitelisted column, then derived values.
    #[must_use]
    pub fn select_list(&self) -> String {
        self.columns
            .iter()
            .map(|column| self.column_sql(column))
            .chain(self.derived.iter().map(Derived::to_sql))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Names a result row may carry: raw or aliased columns and derived aliases.
    #[must_use]
    pub fn output_names(&self) -> Vec<&'static str> {
        self.columns
            .iter()
            .map(|column| self.alias_for(column).unwrap_or(*column))
            .chain(self.derived.iter().map(Derived::alias))
            .collect()
    }

    /// Verify the configuration only refers to whitelisted columns and that
    /// generated names cannot collide.
    ///
    /// # Errors
    ///
    /// Describes the first inconsistency found.
    pub fn check(&self) -> Result<(), String> {
        let unknown = |what: &str, column: &str| {
            format!("{}: {what} refers to non-whitelisted column {column}", self.table)
        };

        for &(raw, _) in self.aliases {
            if !self.is_whitelisted(raw) {
                return Err(unknown("alias", raw));
            }
        }
        for derived in self.derived {
            for column in derived.source_columns() {
                if !self.is_whitelisted(column) {
                    return Err(unknown(derived.alias(), column));
                }
            }
        }
        for filter in self.filters {
            if !self.is_whitelisted(filter.column) {
                return Err(unknown(filter.param, filter.column));
            }
        }
        for &(field, column) in self.sortable {
            if !self.is_whitelisted(column) {
                return Err(unknown(field, column));
            }
        }
        if !self.is_whitelisted(self.default_order) {
            return Err(unknown("default order", self.default_order));
        }

        let mut seen_params = Vec::new();
        let mut seen_suffixes = Vec::new();
        for filter in self.filters {
            if seen_params.contains(&filter.param) {
                return Err(format!("{}: duplicate filter {}", self.table, filter.param));
            }
            seen_params.push(filter.param);
            if let Some(suffix) = filter.suffix() {
                if seen_suffixes.contains(&suffix) || RESERVED_PLACEHOLDERS.contains(&suffix) {
                    return Err(format!("{}: placeholder suffix {suffix} is reused", self.table));
                }
                seen_suffixes.push(suffix);
            }
        }

        let mut names = self.output_names();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        if names.len() != total {
            return Err(format!("{}: output column names are not unique", self.table));
        }

        Ok(())
    }
}

/// Accumulates WHERE conditions and binds until pagination finishes it.
#[derive(Debug)]
pub struct SelectBuilder {
    select: String,
    table: &'static str,
    conditions: Vec<String>,
    binds: BindMap,
    ordering: Option<Ordering>,
}

impl SelectBuilder {
    #[must_use]
    pub fn filter(mut self, clause: Clause) -> Self {
        self.conditions.push(clause.sql);
        self.binds.extend(clause.binds);
        self
    }

    #[must_use]
    pub fn order_by(mut self, ordering: Ordering) -> Self {
        self.ordering = Some(ordering);
        self
    }

    /// Append the LIMIT clause and produce the finished query.
    #[must_use]
    pub fn paginate(self, limit: Clause) -> PreparedQuery {
        let mut sql = format!("SELECT {} FROM {}", self.select, self.table);
        if !self.conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.conditions.join(" AND "));
        }
        if let Some(ordering) = self.ordering {
            sql.push(' ');
            sql.push_str(&ordering.to_sql());
        }
        sql.push(' ');
        sql.push_str(&limit.sql);

        let mut binds = self.binds;
        binds.extend(limit.binds);
        PreparedQuery::new(sql, binds)
    }
}

/// Runs finders for one entity against one request's parameters.
#[derive(Debug, Clone, Copy)]
pub struct QueryGenerator<'a> {
    config: &'static EntityConfig,
    params: &'a ParameterSet,
}

impl<'a> QueryGenerator<'a> {
    #[must_use]
    pub fn new(config: &'static EntityConfig, params: &'a ParameterSet) -> Self {
        Self { config, params }
    }

    #[must_use]
    pub fn config(&self) -> &'static EntityConfig {
        self.config
    }

    /// Every key must be present and non-empty.
    ///
    /// # Errors
    ///
    /// Names the first missing key.
    pub fn require(&self, keys: &[&str]) -> Result<(), ValidationError> {
        validators::require_params(self.params, keys)
    }

    /// A required parameter's text.
    ///
    /// # Errors
    ///
    /// Fails when `key` is missing or empty.
    pub fn text(&self, key: &str) -> Result<String, ValidationError> {
        self.params
            .text(key)
            .ok_or_else(|| ValidationError::new(key, "You are missing a required parameter"))
    }

    /// A required integer parameter.
    ///
    /// # Errors
    ///
    /// Fails when `key` is missing or not a whole number.
    pub fn integer(&self, key: &str) -> Result<i64, ValidationError> {
        validators::require_integer(key, &self.text(key)?)
    }

    /// `column = :placeholder` for a whitelisted key column.
    #[must_use]
    pub fn key_lookup(
        &self,
        column: &'static str,
        placeholder: &str,
        value: impl Into<BindValue>,
    ) -> Clause {
        debug_assert!(
            self.config.is_whitelisted(column),
            "{column} is not whitelisted for {}",
            self.config.table
        );
        equals(column, placeholder, value)
    }

    /// Start a statement selecting the entity's full select list.
    #[must_use]
    pub fn select(&self) -> SelectBuilder {
        self.builder(self.config.select_list())
    }

    /// Start a statement selecting only `columns`; non-whitelisted names are
    /// dropped.
    #[must_use]
    pub fn select_columns(&self, columns: &[&'static str]) -> SelectBuilder {
        let selected: Vec<String> = columns
            .iter()
            .filter(|column| {
                let allowed = self.config.is_whitelisted(column);
                if !allowed {
                    tracing::warn!(
                        table = self.config.table,
                        column = **column,
                        "dropping non-whitelisted column from select"
                    );
                }
                allowed
            })
            .map(|column| self.config.column_sql(column))
            .collect();
        self.builder(selected.join(", "))
    }

    fn builder(&self, select: String) -> SelectBuilder {
        SelectBuilder {
            select,
            table: self.config.table,
            conditions: Vec::new(),
            binds: BindMap::new(),
            ordering: None,
        }
    }

    /// Validate every present filter, then build one clause per filter, both
    /// in declaration order.
    ///
    /// # Errors
    ///
    /// The first failed rule or clause.
    pub fn filters(&self) -> Result<Vec<Clause>, ValidationError> {
        let present: Vec<(&FilterSpec, String)> = self
            .config
            .filters
            .iter()
            .filter_map(|filter| self.params.text(filter.param).map(|value| (filter, value)))
            .collect();

        for (filter, value) in &present {
            filter.validate(value)?;
        }

        present
            .iter()
            .map(|(filter, value)| filter.build(value))
            .collect()
    }

    /// Requested or default ordering.
    ///
    /// # Errors
    ///
    /// An unknown sort field or direction.
    pub fn ordering(&self) -> Result<Ordering, ValidationError> {
        parse_sorting(self.params, self.config.sortable, self.config.default_order)
    }

    #[must_use]
    pub fn limit(&self) -> Clause {
        apply_limit(self.params, self.config.default_limit)
    }

    /// Full select list, the given conditions, ordering and pagination.
    ///
    /// # Errors
    ///
    /// An invalid sort request.
    pub fn find_where(&self, clauses: Vec<Clause>) -> Result<PreparedQuery, ValidationError> {
        let ordering = self.ordering()?;
        Ok(clauses
            .into_iter()
            .fold(self.select(), SelectBuilder::filter)
            .order_by(ordering)
            .paginate(self.limit()))
    }

    /// The general list finder: every declared filter that is present.
    ///
    /// # Errors
    ///
    /// The first invalid filter or sort parameter.
    pub fn find_all_with_filters(&self) -> Result<PreparedQuery, ValidationError> {
        let clauses = self.filters()?;
        self.find_where(clauses)
    }
}
