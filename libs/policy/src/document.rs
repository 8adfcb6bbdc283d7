use std::net::IpAddr;

use crate::allowlist::IpAllowlist;

/// Decision effect of a policy statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Allow,
    Deny,
}

/// Source-address condition a statement applies to.
#[derive(Debug, Clone)]
pub enum SourcePredicate {
    /// Matches every caller.
    AnySource,
    /// Matches callers that are members of the allowlist.
    InAllowlist(IpAllowlist),
    /// Matches callers that are NOT members of the allowlist. This is the
    /// perimeter's narrowing condition, deliberately not a denylist.
    NotInAllowlist(IpAllowlist),
}

impl SourcePredicate {
    fn matches(&self, source: IpAddr) -> bool {
        match self {
            Self::AnySource => true,
            Self::InAllowlist(list) => list.admit(source),
            Self::NotInAllowlist(list) => !list.admit(source),
        }
    }
}

/// One ordered rule of the perimeter policy.
#[derive(Debug, Clone)]
pub struct PolicyStatement {
    pub effect: Effect,
    pub predicate: SourcePredicate,
}

/// Ordered statement list with explicit-deny precedence: any matching Deny
/// wins, otherwise a matching Allow admits, otherwise the caller is denied.
/// An empty document therefore denies everyone.
#[derive(Debug, Clone, Default)]
pub struct PolicyDocument {
    statements: Vec<PolicyStatement>,
}

impl PolicyDocument {
    pub fn new(statements: Vec<PolicyStatement>) -> Self {
        Self { statements }
    }

    /// The canonical perimeter pair: allow any caller, then deny every
    /// caller outside the allowlist.
    pub fn restrict_to(allowlist: IpAllowlist) -> Self {
        Self::new(vec![
            PolicyStatement {
                effect: Effect::Allow,
                predicate: SourcePredicate::AnySource,
            },
            PolicyStatement {
                effect: Effect::Deny,
                predicate: SourcePredicate::NotInAllowlist(allowlist),
            },
        ])
    }

    /// Evaluates the caller's source address. An unresolvable address always
    /// denies (fail-closed).
    pub fn evaluate(&self, source: Option<IpAddr>) -> Effect {
        let Some(source) = source else {
            return Effect::Deny;
        };
        let mut admitted = false;
        for statement in &self.statements {
            if statement.predicate.matches(source) {
                match statement.effect {
                    Effect::Deny => return Effect::Deny,
                    Effect::Allow => admitted = true,
                }
            }
        }
        if admitted { Effect::Allow } else { Effect::Deny }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stripe_ip() -> IpAddr {
        "3.18.12.63".parse().unwrap()
    }

    fn restrict() -> PolicyDocument {
        PolicyDocument::restrict_to(IpAllowlist::parse(["3.18.12.63"]).unwrap())
    }

    #[test]
    fn members_are_admitted() {
        assert_eq!(restrict().evaluate(Some(stripe_ip())), Effect::Allow);
    }

    #[test]
    fn non_members_are_denied() {
        assert_eq!(
            restrict().evaluate(Some("9.9.9.9".parse().unwrap())),
            Effect::Deny
        );
    }

    #[test]
    fn unresolvable_source_is_denied() {
        assert_eq!(restrict().evaluate(None), Effect::Deny);
    }

    #[test]
    fn empty_document_denies() {
        assert_eq!(
            PolicyDocument::default().evaluate(Some(stripe_ip())),
            Effect::Deny
        );
    }

    #[test]
    fn explicit_deny_overrides_allow() {
        let list = IpAllowlist::parse(["3.18.12.63"]).unwrap();
        let doc = PolicyDocument::new(vec![
            PolicyStatement {
                effect: Effect::Allow,
                predicate: SourcePredicate::AnySource,
            },
            PolicyStatement {
                effect: Effect::Deny,
                predicate: SourcePredicate::InAllowlist(list),
            },
        ]);
        assert_eq!(doc.evaluate(Some(stripe_ip())), Effect::Deny);
    }

    #[test]
    fn allow_without_matching_deny_admits() {
        let doc = PolicyDocument::new(vec![PolicyStatement {
            effect: Effect::Allow,
            predicate: SourcePredicate::AnySource,
        }]);
        assert_eq!(doc.evaluate(Some("9.9.9.9".parse().unwrap())), Effect::Allow);
    }
}
