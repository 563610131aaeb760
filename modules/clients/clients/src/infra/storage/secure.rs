//! Owner-scoped query wrappers.
//!
//! Selects and deletes on an [`OwnedEntity`] go through a typestate wrapper
//! that cannot be executed until it has been scoped with an [`OwnerScope`].
//! Scoping adds `owner_col = <owner>` to the query; a deny-all scope adds an
//! always-false predicate instead. Inserts are checked so the row's owner is
//! the scope's owner.
//!
//! ```rust,ignore
//! let row = entity::Entity::find()
//!     .filter(entity::Column::Id.eq(id))
//!     .secure()
//!     .scope_with(&scope)
//!     .one(conn)
//!     .await?;
//! ```

use std::marker::PhantomData;

use manager_security::OwnerScope;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    QueryFilter, Value,
};

/// Entity whose rows belong to exactly one owner.
pub trait OwnedEntity: EntityTrait {
    fn owner_col() -> Self::Column;
}

#[derive(Debug, thiserror::Error)]
pub enum ScopeError {
    #[error("access denied: {0}")]
    Denied(&'static str),

    #[error(transparent)]
    Db(#[from] DbErr),
}

/// Typestate marker: query has not been scoped and cannot run.
#[derive(Debug, Clone, Copy)]
pub struct Unscoped;

/// Typestate marker: owner predicate applied, query may run.
#[derive(Debug, Clone, Copy)]
pub struct Scoped;

fn deny_all() -> Condition {
    Condition::all().add(Expr::value(false))
}

/// Compile an owner scope into a filter for `E`.
#[must_use]
pub fn build_scope_condition<E: OwnedEntity>(scope: &OwnerScope) -> Condition {
    match scope.owner_id() {
        Some(owner) => Condition::all().add(E::owner_col().eq(owner)),
        None => deny_all(),
    }
}

#[must_use]
#[derive(Clone, Debug)]
pub struct SecureSelect<E: EntityTrait, S> {
    inner: sea_orm::Select<E>,
    _state: PhantomData<S>,
}

pub trait SecureEntityExt<E: EntityTrait>: Sized {
    /// Wrap the query; `.scope_with()` must be called before it can run.
    fn secure(self) -> SecureSelect<E, Unscoped>;
}

impl<E: EntityTrait> SecureEntityExt<E> for sea_orm::Select<E> {
    fn secure(self) -> SecureSelect<E, Unscoped> {
        SecureSelect {
            inner: self,
            _state: PhantomData,
        }
    }
}

impl<E: OwnedEntity> SecureSelect<E, Unscoped> {
    pub fn scope_with(self, scope: &OwnerScope) -> SecureSelect<E, Scoped> {
        SecureSelect {
            inner: self.inner.filter(build_scope_condition::<E>(scope)),
            _state: PhantomData,
        }
    }
}

impl<E: EntityTrait> SecureSelect<E, Scoped> {
    /// # Errors
    /// Returns `ScopeError::Db` if the query fails.
    pub async fn one<C: ConnectionTrait>(self, conn: &C) -> Result<Option<E::Model>, ScopeError> {
        Ok(self.inner.one(conn).await?)
    }
}

#[must_use]
#[derive(Clone, Debug)]
pub struct SecureDeleteMany<E: EntityTrait, S> {
    inner: sea_orm::DeleteMany<E>,
    _state: PhantomData<S>,
}

pub trait SecureDeleteExt<E: EntityTrait>: Sized {
    /// Wrap the delete; `.scope_with()` must be called before it can run.
    fn secure(self) -> SecureDeleteMany<E, Unscoped>;
}

impl<E: EntityTrait> SecureDeleteExt<E> for sea_orm::DeleteMany<E> {
    fn secure(self) -> SecureDeleteMany<E, Unscoped> {
        SecureDeleteMany {
            inner: self,
            _state: PhantomData,
        }
    }
}

impl<E: OwnedEntity> SecureDeleteMany<E, Unscoped> {
    pub fn scope_with(self, scope: &OwnerScope) -> SecureDeleteMany<E, Scoped> {
        SecureDeleteMany {
            inner: self.inner.filter(build_scope_condition::<E>(scope)),
            _state: PhantomData,
        }
    }
}

impl<E: EntityTrait> SecureDeleteMany<E, Scoped> {
    /// Run the delete and return the number of rows removed.
    ///
    /// # Errors
    /// Returns `ScopeError::Db` if the statement fails.
    pub async fn exec<C: ConnectionTrait>(self, conn: &C) -> Result<u64, ScopeError> {
        Ok(self.inner.exec(conn).await?.rows_affected)
    }
}

/// Insert a row after checking its owner column against `scope`.
///
/// A deny-all scope, an unset owner, or an owner other than the scope's are
/// all rejected before anything reaches the database. The insert is a plain
/// `INSERT`, so a key collision is a database error rather than an overwrite.
///
/// # Errors
/// Returns `ScopeError::Denied` on an owner mismatch, `ScopeError::Db` if the
/// statement fails.
pub async fn secure_insert<E, A, C>(am: A, scope: &OwnerScope, conn: &C) -> Result<(), ScopeError>
where
    E: OwnedEntity,
    A: ActiveModelTrait<Entity = E> + Send,
    E::Model: sea_orm::IntoActiveModel<A>,
    C: ConnectionTrait,
{
    let Some(owner) = scope.owner_id() else {
        return Err(ScopeError::Denied("insert denied: scope has no owner"));
    };

    match am.get(E::owner_col()) {
        ActiveValue::Set(v) | ActiveValue::Unchanged(v) if v == Value::from(owner) => {}
        ActiveValue::NotSet => return Err(ScopeError::Denied("insert denied: owner not set")),
        _ => return Err(ScopeError::Denied("insert denied: owner not in scope")),
    }

    E::insert(am).exec_without_returning(conn).await?;
    Ok(())
}
