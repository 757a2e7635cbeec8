//! Invitation state machine: `created -> received -> accepted | declined`.
//!
//! Accepted and declined are terminal. A transition attempted on a terminal
//! invitation fails and leaves it untouched.

use crate::entities::{Invitation, InvitationKind, InvitationStatus, Player};
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};

pub fn find_invitation_mut<'a>(
    player: &'a mut Player,
    invitation_bin: &str,
) -> Result<&'a mut Invitation, DomainError> {
    let player_bin = player.bin.clone();
    player.invitations.get_mut(invitation_bin).ok_or_else(|| {
        DomainError::not_found(
            NotFoundKind::Invitation,
            format!("player {player_bin} has no invitation {invitation_bin}"),
        )
    })
}

/// Fail if the invitation was already accepted or declined.
pub fn ensure_open(invitation: &Invitation) -> Result<(), DomainError> {
    if invitation.accepted {
        return Err(DomainError::conflict(
            ConflictKind::InvitationAlreadyAccepted,
            format!("invitation {} already accepted", invitation.bin),
        ));
    }
    if invitation.declined {
        return Err(DomainError::conflict(
            ConflictKind::InvitationAlreadyDeclined,
            format!("invitation {} already declined", invitation.bin),
        ));
    }
    Ok(())
}

pub fn ensure_kind(invitation: &Invitation, kind: InvitationKind) -> Result<(), DomainError> {
    if invitation.kind != kind {
        return Err(DomainError::validation(
            ValidationKind::InvitationKindMismatch,
            format!(
                "invitation {} is a {:?} invitation, expected {:?}",
                invitation.bin, invitation.kind, kind
            ),
        ));
    }
    Ok(())
}

/// Mark an invitation as delivered to its player.
pub fn mark_received(invitation: &mut Invitation) {
    if invitation.status == InvitationStatus::Created {
        invitation.status = InvitationStatus::Received;
    }
}

pub fn accept(invitation: &mut Invitation) -> Result<(), DomainError> {
    ensure_open(invitation)?;
    invitation.accepted = true;
    invitation.declined = false;
    invitation.status = InvitationStatus::Accepted;
    Ok(())
}

pub fn decline(invitation: &mut Invitation) -> Result<(), DomainError> {
    ensure_open(invitation)?;
    invitation.declined = true;
    invitation.accepted = false;
    invitation.status = InvitationStatus::Declined;
    Ok(())
}
