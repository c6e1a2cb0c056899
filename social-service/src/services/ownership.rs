//! Owner-only mutation policy for companies, posts and comments.

use crate::models::{Comment, Company, Identity, Post};

use super::ServiceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Forbidden,
}

/// `Allowed` iff the resource has an owner and it is the caller. A resource
/// without an owner cannot be changed by anyone.
pub fn authorize(owner: Option<i64>, caller: &Identity) -> Decision {
    match owner {
        Some(owner) if owner == caller.user_id() => Decision::Allowed,
        _ => Decision::Forbidden,
    }
}

/// A resource carrying an owner reference.
pub trait Owned {
    const KIND: &'static str;

    fn owner_id(&self) -> Option<i64>;
}

impl Owned for Company {
    const KIND: &'static str = "company";

    fn owner_id(&self) -> Option<i64> {
        self.user_id
    }
}

impl Owned for Post {
    const KIND: &'static str = "post";

    fn owner_id(&self) -> Option<i64> {
        Some(self.user_id)
    }
}

impl Owned for Comment {
    const KIND: &'static str = "comment";

    fn owner_id(&self) -> Option<i64> {
        Some(self.user_id)
    }
}

/// Absent resource is `NotFound`; present but foreign is `Forbidden`.
pub fn require_owner<T: Owned>(resource: Option<T>, caller: &Identity) -> Result<T, ServiceError> {
    let resource = resource.ok_or(ServiceError::NotFound(T::KIND))?;

    match authorize(resource.owner_id(), caller) {
        Decision::Allowed => Ok(resource),
        Decision::Forbidden => {
            tracing::warn!(
                kind = T::KIND,
                caller = caller.user_id(),
                owner = ?resource.owner_id(),
                "Ownership check failed"
            );
            Err(ServiceError::Forbidden(T::KIND))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IdentityFields;
    use chrono::Utc;

    fn caller(user_id: i64) -> Identity {
        let now = Utc::now();
        Identity::new(
            IdentityFields {
                user_id,
                username: format!("user{}", user_id),
                email: format!("user{}@example.com", user_id),
            },
            now,
            now + chrono::Duration::hours(1),
        )
    }

    #[test]
    fn decision_table() {
        let me = caller(5);

        assert_eq!(authorize(Some(5), &me), Decision::Allowed);
        assert_eq!(authorize(Some(6), &me), Decision::Forbidden);
        assert_eq!(authorize(None, &me), Decision::Forbidden);
    }

    #[test]
    fn ownerless_company_is_forbidden_for_everyone() {
        let company = Company {
            id: 1,
            name: "Orphan".to_string(),
            description: None,
            parent_company_id: None,
            industry: None,
            sub_industry: None,
            headquarters: None,
            date_incorporated: None,
            user_id: None,
        };

        for id in [0, 1, 5, i64::MAX] {
            assert!(matches!(
                require_owner(Some(company.clone()), &caller(id)),
                Err(ServiceError::Forbidden("company"))
            ));
        }
    }

    #[test]
    fn absent_is_not_found_before_forbidden() {
        assert!(matches!(
            require_owner::<Post>(None, &caller(5)),
            Err(ServiceError::NotFound("post"))
        ));
    }
}
