use crate::commands::{CmdMessage, CmdResult, Decision, Outcome};
use crate::directory::{Directory, LdapFilter};
use crate::error::Result;
use crate::mattermost::UserDeleter;
use crate::model::CandidateUser;
use crate::store::UserStore;
use tracing::{debug, info, warn};

/// One pass over every soft-deleted user.
///
/// Users still present in the directory are kept. Users the directory no
/// longer knows are handed to `deleter`, unless `dry_run` is set. The first
/// error stops the pass: no later candidate is looked up or deleted.
pub fn run<S: UserStore, D: Directory, X: UserDeleter>(
    store: &mut S,
    directory: &mut D,
    deleter: &mut X,
    dry_run: bool,
) -> Result<CmdResult> {
    let candidates = store.soft_deleted_users()?;
    debug!("found {} delete candidates", candidates.len());

    let mut result = CmdResult::default();
    for user in candidates {
        let outcome = decide(directory, deleter, user, dry_run)?;
        result.add_outcome(outcome);
    }

    let summary = result.summary();
    if summary.candidates == 0 {
        result.add_message(CmdMessage::info("No soft-deleted users found."));
        return Ok(result);
    }

    result.add_message(CmdMessage::info(format!(
        "Checked {} candidates: {} present in LDAP, {} absent, {} skipped",
        summary.candidates, summary.present, summary.absent, summary.skipped
    )));
    if dry_run && summary.absent > 0 {
        result.add_message(CmdMessage::warning(format!(
            "Dry run: {} user(s) would have been deleted",
            summary.absent
        )));
    } else if summary.deleted > 0 {
        result.add_message(CmdMessage::success(format!(
            "Deleted {} user(s)",
            summary.deleted
        )));
    }

    Ok(result)
}

fn decide<D: Directory, X: UserDeleter>(
    directory: &mut D,
    deleter: &mut X,
    user: CandidateUser,
    dry_run: bool,
) -> Result<Outcome> {
    let Some(uid) = user.directory_uid() else {
        warn!(
            "user {} ({}) has no LDAP identity, skipping",
            user.username, user.id
        );
        return Ok(Outcome {
            user,
            filter: None,
            decision: Decision::Skipped,
        });
    };

    let filter = LdapFilter::uid(uid);
    debug!(
        "user: {} is a candidate, LDAP-search: {}",
        user.username, filter
    );
    if let Some(deleted_at) = user.deleted_at() {
        debug!("user {} was deactivated at {}", user.username, deleted_at);
    }

    let decision = if directory.contains(&filter)? {
        debug!("user {} exists in LDAP, skipping", filter);
        Decision::Present
    } else {
        info!("user {} not found in LDAP, deleting", filter);
        if dry_run {
            info!("dry run, not deleting user with ID {}", user.id);
            Decision::Absent { deleted: false }
        } else {
            info!("deleting user with ID {}", user.id);
            deleter.delete_user(&user)?;
            Decision::Absent { deleted: true }
        }
    };

    Ok(Outcome {
        user,
        filter: Some(filter.to_string()),
        decision,
    })
}
