//! Member enrollment and profile management.

use chrono::Utc;
use timebank_core::error::CoreError;
use timebank_core::ledger::OwnerKind;
use timebank_core::roles::ROLE_MEMBER;
use timebank_core::types::new_id;

use crate::models::member::{CreateMember, Member, UpdateMemberProfile};
use crate::repositories::{BalanceRepo, MemberRepo, NotificationPrefRepo, RoleRepo};
use crate::services::ServiceResult;
use crate::DbPool;

/// Enroll a member for an authenticated account.
///
/// One transaction creates the member row, the role row for the linked user,
/// a zero starting balance, and all-true notification preferences. Enforced
/// unique: one member per account.
pub async fn enroll(pool: &DbPool, input: CreateMember) -> ServiceResult<Member> {
    let mut tx = pool.begin().await?;

    if MemberRepo::get_by_user_id(&mut tx, &input.user_id)
        .await?
        .is_some()
    {
        return Err(CoreError::Conflict(format!(
            "member already enrolled for user {}",
            input.user_id
        ))
        .into());
    }

    let now = Utc::now();
    let member = Member {
        id: new_id(),
        user_id: input.user_id,
        name: input.name,
        contact: input.contact,
        area: input.area,
        created_at: now,
    };

    MemberRepo::insert(&mut tx, &member).await?;
    let role = input.role.as_deref().unwrap_or(ROLE_MEMBER);
    RoleRepo::insert(&mut tx, &member.user_id, role, now).await?;
    BalanceRepo::set(&mut tx, OwnerKind::Member, &member.id, 0.0, now).await?;
    NotificationPrefRepo::insert_defaults(&mut tx, &member.id, now).await?;

    tx.commit().await?;

    tracing::info!(member_id = %member.id, user_id = %member.user_id, %role, "member enrolled");
    Ok(member)
}

/// The member-directory seam: member linked to a user account.
pub async fn get_by_user(pool: &DbPool, user_id: &str) -> ServiceResult<Member> {
    let mut conn = pool.acquire().await?;
    MemberRepo::get_by_user_id(&mut conn, user_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Member", user_id).into())
}

/// Partially update a member's profile; unspecified fields keep their prior
/// value. Members are never deleted, only edited.
pub async fn update_profile(
    pool: &DbPool,
    member_id: &str,
    update: UpdateMemberProfile,
) -> ServiceResult<Member> {
    let mut tx = pool.begin().await?;

    let current = MemberRepo::get(&mut tx, member_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Member", member_id))?;

    let name = update.name.unwrap_or_else(|| current.name.clone());
    let contact = update.contact.unwrap_or_else(|| current.contact.clone());
    let area = update.area.unwrap_or_else(|| current.area.clone());

    MemberRepo::update_profile(&mut tx, &current.id, &name, &contact, &area).await?;

    tx.commit().await?;

    Ok(Member {
        name,
        contact,
        area,
        ..current
    })
}
