//! Closed enumeration of grammar rules.
//!
//! Every `ParseNode` carries exactly one `RuleKind`. Traversal callback tables
//! are indexed by `RuleKind::index`, so adding a rule is a one-line change
//! here and needs no new listener surface.

use std::fmt;

use serde::Serialize;

macro_rules! rule_kinds {
    ($($variant:ident => $name:literal,)*) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        pub enum RuleKind {
            $($variant,)*
        }

        impl RuleKind {
            pub const ALL: &'static [Self] = &[$(Self::$variant,)*];
            pub const COUNT: usize = Self::ALL.len();

            /// Grammar rule name, snake case.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }
        }
    };
}

rule_kinds! {
    // Root wrapper: one statement body plus its optional terminator.
    Stmt => "stmt",

    // Queries
    SelectStmt => "select_stmt",
    // DML
    InsertStmt => "insert_stmt",
    MultiTableInsertStmt => "multi_table_insert_stmt",
    UpdateStmt => "update_stmt",
    DeleteStmt => "delete_stmt",
    MergeStmt => "merge_stmt",
    LoadDataStmt => "load_data_stmt",
    CallStmt => "call_stmt",
    // DDL
    CreateTableStmt => "create_table_stmt",
    CreateTableLikeStmt => "create_table_like_stmt",
    CreateIndexStmt => "create_index_stmt",
    CreateViewStmt => "create_view_stmt",
    CreateDatabaseStmt => "create_database_stmt",
    CreateSequenceStmt => "create_sequence_stmt",
    CreateUserStmt => "create_user_stmt",
    CreateRoleStmt => "create_role_stmt",
    CreateSynonymStmt => "create_synonym_stmt",
    CreateTablegroupStmt => "create_tablegroup_stmt",
    AlterTableStmt => "alter_table_stmt",
    AlterIndexStmt => "alter_index_stmt",
    AlterDatabaseStmt => "alter_database_stmt",
    AlterSequenceStmt => "alter_sequence_stmt",
    AlterUserStmt => "alter_user_stmt",
    DropTableStmt => "drop_table_stmt",
    DropViewStmt => "drop_view_stmt",
    DropIndexStmt => "drop_index_stmt",
    DropDatabaseStmt => "drop_database_stmt",
    DropSequenceStmt => "drop_sequence_stmt",
    DropUserStmt => "drop_user_stmt",
    DropRoleStmt => "drop_role_stmt",
    DropSynonymStmt => "drop_synonym_stmt",
    DropTablegroupStmt => "drop_tablegroup_stmt",
    DropRoutineStmt => "drop_routine_stmt",
    TruncateTableStmt => "truncate_table_stmt",
    RenameTableStmt => "rename_table_stmt",
    CommentStmt => "comment_stmt",
    FlashbackStmt => "flashback_stmt",
    PurgeStmt => "purge_stmt",
    // Transaction control
    BeginStmt => "begin_stmt",
    CommitStmt => "commit_stmt",
    RollbackStmt => "rollback_stmt",
    SavepointStmt => "savepoint_stmt",
    ReleaseSavepointStmt => "release_savepoint_stmt",
    SetTransactionStmt => "set_transaction_stmt",
    XaStmt => "xa_stmt",
    LockTablesStmt => "lock_tables_stmt",
    UnlockTablesStmt => "unlock_tables_stmt",
    // Administration
    AlterSystemStmt => "alter_system_stmt",
    AlterSessionStmt => "alter_session_stmt",
    VariableSetStmt => "variable_set_stmt",
    SetNamesStmt => "set_names_stmt",
    SetPasswordStmt => "set_password_stmt",
    ShowStmt => "show_stmt",
    ExplainStmt => "explain_stmt",
    DescribeStmt => "describe_stmt",
    UseDatabaseStmt => "use_database_stmt",
    GrantStmt => "grant_stmt",
    RevokeStmt => "revoke_stmt",
    KillStmt => "kill_stmt",
    PrepareStmt => "prepare_stmt",
    ExecuteStmt => "execute_stmt",
    DeallocatePrepareStmt => "deallocate_prepare_stmt",
    HelpStmt => "help_stmt",
    AnalyzeStmt => "analyze_stmt",

    HintClause => "hint_clause",

    // Query structure
    WithClause => "with_clause",
    CommonTableExpr => "common_table_expr",
    SetExpression => "set_expression",
    SelectWithParens => "select_with_parens",
    SimpleSelect => "simple_select",
    TableValueConstructor => "table_value_constructor",
    Projection => "projection",
    SelectItem => "select_item",
    Alias => "alias",
    IntoClause => "into_clause",
    FromClause => "from_clause",
    TableFactor => "table_factor",
    RelationFactor => "relation_factor",
    DerivedTable => "derived_table",
    ParenTableReference => "paren_table_reference",
    JoinedTable => "joined_table",
    JoinCondition => "join_condition",
    UsePartition => "use_partition",
    IndexHint => "index_hint",
    FlashbackQuery => "flashback_query",
    SampleClause => "sample_clause",
    WhereClause => "where_clause",
    HierarchicalClause => "hierarchical_clause",
    GroupByClause => "group_by_clause",
    GroupingElement => "grouping_element",
    HavingClause => "having_clause",
    WindowClause => "window_clause",
    NamedWindow => "named_window",
    WindowSpec => "window_spec",
    WindowFrame => "window_frame",
    FrameBound => "frame_bound",
    OrderByClause => "order_by_clause",
    SortKey => "sort_key",
    LimitClause => "limit_clause",
    FetchClause => "fetch_clause",
    LockingClause => "locking_clause",

    // DML pieces
    ColumnList => "column_list",
    ValuesClause => "values_clause",
    ValuesRow => "values_row",
    Assignment => "assignment",
    SetClause => "set_clause",
    OnDuplicateKeyUpdate => "on_duplicate_key_update",
    RowAlias => "row_alias",
    ReturningClause => "returning_clause",
    InsertIntoClause => "insert_into_clause",
    ConditionalInsertClause => "conditional_insert_clause",
    MergeMatchedClause => "merge_matched_clause",
    MergeNotMatchedClause => "merge_not_matched_clause",
    LoadDataOption => "load_data_option",

    // Expressions
    OrExpr => "or_expr",
    XorExpr => "xor_expr",
    AndExpr => "and_expr",
    NotExpr => "not_expr",
    IsExpr => "is_expr",
    ComparisonExpr => "comparison_expr",
    QuantifiedSubquery => "quantified_subquery",
    InExpr => "in_expr",
    BetweenExpr => "between_expr",
    LikeExpr => "like_expr",
    RegexpExpr => "regexp_expr",
    MemberOfExpr => "member_of_expr",
    SoundsLikeExpr => "sounds_like_expr",
    BitExpr => "bit_expr",
    UnaryExpr => "unary_expr",
    CollateExpr => "collate_expr",
    AssignExpr => "assign_expr",
    JsonAccessExpr => "json_access_expr",
    ColumnRef => "column_ref",
    OuterJoinMarker => "outer_join_marker",
    Literal => "literal",
    TypedLiteral => "typed_literal",
    IntervalExpr => "interval_expr",
    ParamMarker => "param_marker",
    Variable => "variable",
    FunctionCall => "function_call",
    NamedArgument => "named_argument",
    OverClause => "over_clause",
    PseudoColumn => "pseudo_column",
    CaseExpr => "case_expr",
    WhenClause => "when_clause",
    ElseClause => "else_clause",
    CastExpr => "cast_expr",
    ConvertExpr => "convert_expr",
    SpecialFunctionCall => "special_function_call",
    ExistsExpr => "exists_expr",
    SubqueryExpr => "subquery_expr",
    ParenExpr => "paren_expr",
    RowExpr => "row_expr",
    ExprList => "expr_list",
    DefaultExpr => "default_expr",

    // Names
    Identifier => "identifier",
    UserName => "user_name",
    UserSpec => "user_spec",

    // DDL pieces
    TableElementList => "table_element_list",
    ColumnDefinition => "column_definition",
    ColumnAttribute => "column_attribute",
    DataType => "data_type",
    OutOfLineConstraint => "out_of_line_constraint",
    OutOfLineIndex => "out_of_line_index",
    ReferencesClause => "references_clause",
    ReferentialAction => "referential_action",
    IndexColumn => "index_column",
    IndexOption => "index_option",
    TableOption => "table_option",
    PartitionOption => "partition_option",
    SubpartitionOption => "subpartition_option",
    PartitionDefinition => "partition_definition",
    SubpartitionDefinition => "subpartition_definition",
    PartitionValues => "partition_values",
    ViewOption => "view_option",
    CheckOptionClause => "check_option_clause",
    DatabaseOption => "database_option",
    SequenceOption => "sequence_option",
    AlterTableAction => "alter_table_action",
    ColumnPosition => "column_position",

    // Administration pieces
    VarAssignment => "var_assignment",
    ShowFilter => "show_filter",
    ExplainOption => "explain_option",
    TransactionCharacteristic => "transaction_characteristic",
    PrivilegeList => "privilege_list",
    Privilege => "privilege",
    PrivilegeLevel => "privilege_level",
    LockTableItem => "lock_table_item",
    XidSpec => "xid_spec",
}

/// Coarse grouping of statement rule kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementCategory {
    Query,
    Dml,
    Ddl,
    Transaction,
    Admin,
}

impl RuleKind {
    /// Position of this kind in `RuleKind::ALL`, used to index callback tables.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Statement category for statement rule kinds, `None` for every other rule.
    #[must_use]
    pub const fn category(self) -> Option<StatementCategory> {
        use StatementCategory::{Admin, Ddl, Dml, Query, Transaction};
        let cat = match self {
            Self::SelectStmt => Query,
            Self::InsertStmt
            | Self::MultiTableInsertStmt
            | Self::UpdateStmt
            | Self::DeleteStmt
            | Self::MergeStmt
            | Self::LoadDataStmt
            | Self::CallStmt => Dml,
            Self::CreateTableStmt
            | Self::CreateTableLikeStmt
            | Self::CreateIndexStmt
            | Self::CreateViewStmt
            | Self::CreateDatabaseStmt
            | Self::CreateSequenceStmt
            | Self::CreateUserStmt
            | Self::CreateRoleStmt
            | Self::CreateSynonymStmt
            | Self::CreateTablegroupStmt
            | Self::AlterTableStmt
            | Self::AlterIndexStmt
            | Self::AlterDatabaseStmt
            | Self::AlterSequenceStmt
            | Self::AlterUserStmt
            | Self::DropTableStmt
            | Self::DropViewStmt
            | Self::DropIndexStmt
            | Self::DropDatabaseStmt
            | Self::DropSequenceStmt
            | Self::DropUserStmt
            | Self::DropRoleStmt
            | Self::DropSynonymStmt
            | Self::DropTablegroupStmt
            | Self::DropRoutineStmt
            | Self::TruncateTableStmt
            | Self::RenameTableStmt
            | Self::CommentStmt
            | Self::FlashbackStmt
            | Self::PurgeStmt => Ddl,
            Self::BeginStmt
            | Self::CommitStmt
            | Self::RollbackStmt
            | Self::SavepointStmt
            | Self::ReleaseSavepointStmt
            | Self::SetTransactionStmt
            | Self::XaStmt
            | Self::LockTablesStmt
            | Self::UnlockTablesStmt => Transaction,
            Self::AlterSystemStmt
            | Self::AlterSessionStmt
            | Self::VariableSetStmt
            | Self::SetNamesStmt
            | Self::SetPasswordStmt
            | Self::ShowStmt
            | Self::ExplainStmt
            | Self::DescribeStmt
            | Self::UseDatabaseStmt
            | Self::GrantStmt
            | Self::RevokeStmt
            | Self::KillStmt
            | Self::PrepareStmt
            | Self::ExecuteStmt
            | Self::DeallocatePrepareStmt
            | Self::HelpStmt
            | Self::AnalyzeStmt => Admin,
            _ => return None,
        };
        Some(cat)
    }

    #[must_use]
    pub const fn is_statement(self) -> bool {
        self.category().is_some()
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_matches_position_in_all() {
        for (i, kind) in RuleKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i, "{kind}");
        }
        assert_eq!(RuleKind::COUNT, RuleKind::ALL.len());
    }

    #[test]
    fn names_are_unique_snake_case() {
        let mut names: Vec<&str> = RuleKind::ALL.iter().map(|k| k.name()).collect();
        assert!(names
            .iter()
            .all(|n| n.chars().all(|c| c.is_ascii_lowercase() || c == '_')));
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), RuleKind::COUNT);
    }

    #[test]
    fn statement_kinds_end_in_stmt() {
        for kind in RuleKind::ALL {
            if kind.is_statement() {
                assert!(kind.name().ends_with("_stmt"), "{kind}");
            }
        }
        assert!(!RuleKind::Stmt.is_statement());
        assert_eq!(RuleKind::SelectStmt.category(), Some(StatementCategory::Query));
        assert_eq!(RuleKind::MergeStmt.category(), Some(StatementCategory::Dml));
        assert_eq!(RuleKind::XaStmt.category(), Some(StatementCategory::Transaction));
        assert_eq!(RuleKind::Literal.category(), None);
    }
}
