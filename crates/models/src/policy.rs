//! Authorization, quota and eligibility rules.
//!
//! Every function here is a pure decision over an [`Actor`] and facts the
//! caller has already loaded. The `ensure_*` variants turn a refusal into the
//! matching [`PolicyError`] so services can bail out with `?`.

use crate::{
    actor::{Actor, Owned},
    error::PolicyError,
};

/// Most reservations a non-admin user may hold at once
pub const MAX_RESERVATIONS_PER_USER: u64 = 3;

/// Owner-or-admin rule for updating or deleting a reservation or feedback
pub fn can_modify<E: Owned + ?Sized>(actor: &Actor, entity: &E) -> bool {
    actor.is_admin() || entity.owner_id() == actor.id
}

/// Admin-only rule for the management routes; ownership is ignored
pub fn can_manage(actor: &Actor) -> bool {
    actor.is_admin()
}

/// Quota rule, given how many reservations the actor already holds
pub fn can_reserve(actor: &Actor, existing_count: u64) -> bool {
    actor.is_admin() || existing_count < MAX_RESERVATIONS_PER_USER
}

/// Eligibility rule, given how many of the actor's reservations point at the restaurant
pub fn can_leave_feedback(actor: &Actor, prior_reservations: u64) -> bool {
    actor.is_admin() || prior_reservations > 0
}

pub fn ensure_can_modify<E: Owned + ?Sized>(
    actor: &Actor,
    entity: &E,
    action: &'static str,
    entity_name: &'static str,
) -> Result<(), PolicyError> {
    if can_modify(actor, entity) {
        Ok(())
    } else {
        Err(PolicyError::NotAuthorized {
            actor: actor.id,
            action,
            entity: entity_name,
        })
    }
}

pub fn ensure_admin(actor: &Actor) -> Result<(), PolicyError> {
    if can_manage(actor) {
        Ok(())
    } else {
        Err(PolicyError::AdminOnly(actor.role))
    }
}

pub fn ensure_can_reserve(actor: &Actor, existing_count: u64) -> Result<(), PolicyError> {
    if can_reserve(actor, existing_count) {
        Ok(())
    } else {
        Err(PolicyError::QuotaExceeded {
            actor: actor.id,
            limit: MAX_RESERVATIONS_PER_USER,
        })
    }
}

pub fn ensure_can_leave_feedback(
    actor: &Actor,
    prior_reservations: u64,
) -> Result<(), PolicyError> {
    if can_leave_feedback(actor, prior_reservations) {
        Ok(())
    } else {
        Err(PolicyError::NoPriorReservation)
    }
}
