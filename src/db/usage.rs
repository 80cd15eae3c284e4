//! Referential-integrity guard
//!
//! Before an entity is deleted, [`UsageGuard::check_usage`] consults a
//! declarative table of "who points at this entity" rules and counts the
//! dependents still referencing it. Callers refuse the delete while any count
//! is non-zero.
//!
//! Evaluation is best-effort: a rule whose count query fails is skipped and
//! reported under `degraded` instead of failing the whole check, so one
//! misconfigured rule cannot block every deletion. The rule table itself is
//! validated against the model field metadata at startup ([`validate_rules`]),
//! which catches renamed fields before they silently count zero forever.

use std::collections::BTreeMap;

use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tracing::warn;

use crate::db::models;

/// One dependency rule: records in `dependent` whose `field` holds the target
/// id are counted under `label`.
#[derive(Debug, Clone, Copy)]
pub struct UsageRule {
    /// Table of the entity being deleted
    pub source: &'static str,
    /// Table holding the referencing records
    pub dependent: &'static str,
    /// Foreign-key field on the dependent table
    pub field: &'static str,
    /// Human-readable plural used in messages and the dependency map
    pub label: &'static str,
}

/// Process-wide rule table. Order matters: message clauses follow it.
pub const USAGE_RULES: &[UsageRule] = &[
    UsageRule {
        source: "category",
        dependent: "subcategory",
        field: "category",
        label: "subcategories",
    },
    UsageRule {
        source: "category",
        dependent: "review",
        field: "category",
        label: "reviews",
    },
    UsageRule {
        source: "category",
        dependent: "tech_news",
        field: "category",
        label: "tech news",
    },
    UsageRule {
        source: "subcategory",
        dependent: "review",
        field: "subcategory",
        label: "reviews",
    },
    UsageRule {
        source: "subcategory",
        dependent: "tech_news",
        field: "subcategory",
        label: "tech news",
    },
    UsageRule {
        source: "review",
        dependent: "comment",
        field: "review",
        label: "comments",
    },
    UsageRule {
        source: "tech_news",
        dependent: "comment",
        field: "tech_news",
        label: "comments",
    },
];

/// Result of a usage check.
#[derive(Debug, Clone, Serialize)]
pub struct UsageReport {
    /// True iff any dependent count is non-zero
    pub is_used: bool,
    /// Comma-joined "used in N <label>" clauses in rule order
    pub message: String,
    /// Label -> count, only for labels with a non-zero count
    pub dependencies: BTreeMap<String, i64>,
    /// Labels whose rule could not be evaluated; a "not used" verdict is only
    /// as trustworthy as this list is empty
    pub degraded: Vec<String>,
}

impl UsageReport {
    fn empty() -> Self {
        Self {
            is_used: false,
            message: String::new(),
            dependencies: BTreeMap::new(),
            degraded: Vec::new(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("usage rule '{label}': {problem}")]
pub struct InvalidUsageRule {
    pub label: String,
    pub problem: String,
}

/// Verify every rule against the model field metadata. Run at startup so a
/// renamed table or field fails fast instead of silently counting zero.
pub fn validate_rules(rules: &[UsageRule]) -> Result<(), InvalidUsageRule> {
    for rule in rules {
        if models::table_fields(rule.source).is_none() {
            return Err(InvalidUsageRule {
                label: rule.label.to_string(),
                problem: format!("unknown source table '{}'", rule.source),
            });
        }
        match models::table_fields(rule.dependent) {
            None => {
                return Err(InvalidUsageRule {
                    label: rule.label.to_string(),
                    problem: format!("unknown dependent table '{}'", rule.dependent),
                });
            }
            Some(fields) if !fields.contains(&rule.field) => {
                return Err(InvalidUsageRule {
                    label: rule.label.to_string(),
                    problem: format!("field '{}.{}' does not exist", rule.dependent, rule.field),
                });
            }
            Some(_) => {}
        }
    }
    Ok(())
}

/// Counts dependents of an entity per the rule table.
#[derive(Clone)]
pub struct UsageGuard {
    db: Surreal<Db>,
}

impl UsageGuard {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    /// Report whether the record `id` (full "table:key" form) of `entity_table`
    /// is still referenced. An entity table with no configured rules yields an
    /// empty report; that means "no known rule applies", not "verified safe".
    pub async fn check_usage(&self, entity_table: &str, id: &str) -> UsageReport {
        self.check_with_rules(USAGE_RULES, entity_table, id).await
    }

    async fn check_with_rules(
        &self,
        rules: &[UsageRule],
        entity_table: &str,
        id: &str,
    ) -> UsageReport {
        let mut report = UsageReport::empty();
        let mut clauses: Vec<String> = Vec::new();

        for rule in rules.iter().filter(|r| r.source == entity_table) {
            // Table and field come from the static rule table, never from the
            // request, so embedding them in the query text is safe.
            let query = format!(
                "SELECT count() FROM {} WHERE {} = $id GROUP ALL",
                rule.dependent, rule.field
            );

            let count = match self.db.query(query).bind(("id", id.to_string())).await {
                Ok(mut response) => match response.take::<Option<i64>>((0, "count")) {
                    Ok(count) => count.unwrap_or(0),
                    Err(e) => {
                        warn!(
                            label = rule.label,
                            dependent = rule.dependent,
                            error = %e,
                            "Usage rule evaluation failed, skipping"
                        );
                        report.degraded.push(rule.label.to_string());
                        continue;
                    }
                },
                Err(e) => {
                    warn!(
                        label = rule.label,
                        dependent = rule.dependent,
                        error = %e,
                        "Usage rule evaluation failed, skipping"
                    );
                    report.degraded.push(rule.label.to_string());
                    continue;
                }
            };

            if count > 0 {
                clauses.push(format!("used in {} {}", count, rule.label));
                report.dependencies.insert(rule.label.to_string(), count);
            }
        }

        report.is_used = !report.dependencies.is_empty();
        report.message = clauses.join(", ");
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use surrealdb::engine::local::Mem;

    async fn mem_db() -> Surreal<Db> {
        let db = Surreal::new::<Mem>(()).await.expect("mem engine");
        db.use_ns("test").use_db("test").await.expect("ns/db");
        db
    }

    async fn seed_dependent(db: &Surreal<Db>, table: &str, field: &str, target: &str, n: usize) {
        for i in 0..n {
            db.query(format!("CREATE {} SET {} = $target, seq = $seq", table, field))
                .bind(("target", target.to_string()))
                .bind(("seq", i as i64))
                .await
                .expect("seed dependent");
        }
    }

    #[tokio::test]
    async fn test_unreferenced_entity_is_safe() {
        let guard = UsageGuard::new(mem_db().await);
        let report = guard.check_usage("category", "category:c123").await;
        assert!(!report.is_used);
        assert!(report.message.is_empty());
        assert!(report.dependencies.is_empty());
        assert!(report.degraded.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_entity_type_has_no_rules() {
        let guard = UsageGuard::new(mem_db().await);
        let report = guard.check_usage("static_page", "static_page:about").await;
        assert!(!report.is_used);
        assert!(report.dependencies.is_empty());
    }

    #[tokio::test]
    async fn test_counts_aggregate_across_rules() {
        let db = mem_db().await;
        seed_dependent(&db, "subcategory", "category", "category:cat1", 3).await;
        seed_dependent(&db, "review", "category", "category:cat1", 2).await;
        // Records pointing at a different category must not count
        seed_dependent(&db, "review", "category", "category:cat2", 4).await;

        let guard = UsageGuard::new(db);
        let report = guard.check_usage("category", "category:cat1").await;

        assert!(report.is_used);
        assert_eq!(report.dependencies.get("subcategories"), Some(&3));
        assert_eq!(report.dependencies.get("reviews"), Some(&2));
        assert!(report.dependencies.get("tech news").is_none());
        assert_eq!(report.message, "used in 3 subcategories, used in 2 reviews");
    }

    #[tokio::test]
    async fn test_report_clears_after_dependents_removed() {
        let db = mem_db().await;
        seed_dependent(&db, "comment", "review", "review:r1", 2).await;

        let guard = UsageGuard::new(db.clone());
        assert!(guard.check_usage("review", "review:r1").await.is_used);

        db.query("DELETE comment WHERE review = $id")
            .bind(("id", "review:r1".to_string()))
            .await
            .expect("delete dependents");

        let report = guard.check_usage("review", "review:r1").await;
        assert!(!report.is_used);
        assert!(report.dependencies.is_empty());
    }

    #[tokio::test]
    async fn test_broken_rule_degrades_instead_of_failing() {
        let db = mem_db().await;
        seed_dependent(&db, "review", "category", "category:cat1", 1).await;

        let rules = [
            UsageRule {
                source: "category",
                dependent: "sub category",
                field: "category",
                label: "subcategories",
            },
            UsageRule {
                source: "category",
                dependent: "review",
                field: "category",
                label: "reviews",
            },
        ];

        let guard = UsageGuard::new(db);
        let report = guard
            .check_with_rules(&rules, "category", "category:cat1")
            .await;

        // The malformed rule is reported, the healthy one still counts
        assert_eq!(report.degraded, vec!["subcategories".to_string()]);
        assert_eq!(report.dependencies.get("reviews"), Some(&1));
        assert!(report.is_used);
    }

    #[test]
    fn test_builtin_rules_match_model_fields() {
        validate_rules(USAGE_RULES).expect("builtin rule table must be consistent");
    }

    #[test]
    fn test_validate_rejects_renamed_field() {
        let rules = [UsageRule {
            source: "category",
            dependent: "review",
            field: "category_id",
            label: "reviews",
        }];
        let err = validate_rules(&rules).unwrap_err();
        assert!(err.to_string().contains("review.category_id"));
    }
}
