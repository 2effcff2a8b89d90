// src/core/engine/social.rs

use tracing::debug;

use crate::core::engine::{age_band, RiskModel, ScoreCard};
use crate::core::knowledge_base::{
    PROFILE_COMPLETE, PROFILE_ESTABLISHED, PROFILE_FEW_FOLLOWERS, PROFILE_FOLLOW_RATIO,
    PROFILE_LARGE_AUDIENCE, PROFILE_NEW_ACCOUNT, PROFILE_NO_ACTIVITY, PROFILE_NO_PICTURE,
    PROFILE_OFFICIAL, PROFILE_REGULAR_POSTING, PROFILE_VERIFIED,
};
use crate::core::models::{ActivitySignals, FactRecord, FlagSet, RiskLevel};

const LARGE_AUDIENCE: u64 = 1000;
const SMALL_AUDIENCE: u64 = 100;
const FEW_FOLLOWERS: u64 = 10;
const REGULAR_POSTS: u64 = 10;
const MASS_FOLLOW_MIN: u64 = 500;
const MASS_FOLLOW_RATIO: u64 = 10;

/// Rules for the social-profile checker (`authenticityScore`).
pub struct ProfileModel;

/// Follows many accounts while almost nobody follows back.
fn mass_following(activity: &ActivitySignals) -> bool {
    activity.following > MASS_FOLLOW_MIN
        && activity.following > activity.followers.saturating_mul(MASS_FOLLOW_RATIO)
}

impl RiskModel for ProfileModel {
    fn score(&self, record: &FactRecord) -> ScoreCard {
        let mut card = ScoreCard::new();
        let trust = &record.trust;
        let activity = &record.activity;

        card.apply(age_band(record.age_in_days));
        card.apply_if(trust.verified == Some(true), "verified_badge", 20);
        card.apply_if(trust.has_profile_picture == Some(true), "profile_picture", 5);
        card.apply_if(trust.has_bio == Some(true), "bio", 5);
        card.apply_if(activity.followers >= LARGE_AUDIENCE, "large_audience", 10);
        card.apply_if(
            (SMALL_AUDIENCE..LARGE_AUDIENCE).contains(&activity.followers),
            "small_audience",
            5,
        );
        card.apply_if(activity.posts >= REGULAR_POSTS, "regular_posting", 5);
        card.apply_if(activity.posts == 0, "no_posts", -10);
        card.apply_if(mass_following(activity), "mass_following", -15);
        card.apply_if(trust.known_good, "known_official_account", 15);

        debug!(handle = %record.subject_id, raw = card.raw(), "Profile score computed.");
        card
    }

    fn flags(&self, record: &FactRecord) -> FlagSet {
        let mut flags = FlagSet::default();
        let trust = &record.trust;
        let activity = &record.activity;

        flags.red_if(record.age_in_days.is_some_and(|a| a < 30), &PROFILE_NEW_ACCOUNT);
        flags.red_if(activity.posts == 0, &PROFILE_NO_ACTIVITY);
        flags.red_if(trust.has_profile_picture != Some(true), &PROFILE_NO_PICTURE);
        flags.red_if(mass_following(activity), &PROFILE_FOLLOW_RATIO);
        flags.red_if(activity.followers < FEW_FOLLOWERS, &PROFILE_FEW_FOLLOWERS);

        flags.green_if(record.age_in_days.is_some_and(|a| a > 365), &PROFILE_ESTABLISHED);
        flags.green_if(trust.verified == Some(true), &PROFILE_VERIFIED);
        flags.green_if(activity.followers >= LARGE_AUDIENCE, &PROFILE_LARGE_AUDIENCE);
        flags.green_if(activity.posts >= REGULAR_POSTS, &PROFILE_REGULAR_POSTING);
        flags.green_if(
            trust.has_profile_picture == Some(true) && trust.has_bio == Some(true),
            &PROFILE_COMPLETE,
        );
        flags.green_if(trust.known_good, &PROFILE_OFFICIAL);

        flags
    }

    fn verdict_lines(&self, verdict: RiskLevel) -> [&'static str; 2] {
        match verdict {
            RiskLevel::High => [
                "Avoid engaging with this profile",
                "Report the profile to the platform if it impersonates someone",
            ],
            RiskLevel::Medium => [
                "Be cautious when engaging with this profile",
                "Verify the person's identity through another channel",
            ],
            RiskLevel::Low => [
                "This profile appears to be authentic",
                "Safe to engage with using normal precautions",
            ],
        }
    }

    fn advisories(&self, record: &FactRecord, flags: &FlagSet) -> Vec<&'static str> {
        let mut lines = Vec::new();
        if record.trust.verified != Some(true) {
            lines.push("Look for the platform's verification badge on accounts that claim to be official");
        }
        if flags.has_red(&PROFILE_FOLLOW_RATIO) {
            lines.push("Be wary of follow-for-follow schemes and unsolicited direct messages");
        }
        if flags.has_red(&PROFILE_NEW_ACCOUNT) {
            lines.push("Newly created accounts are frequently used for impersonation");
        }
        lines
    }

    fn closing_lines(&self) -> [&'static str; 2] {
        [
            "Never share passwords or verification codes in direct messages",
            "Always verify through official channels",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Category, Platform};

    fn record() -> FactRecord {
        FactRecord::empty("someone", Category::Profile { platform: Platform::Instagram })
    }

    #[test]
    fn mass_following_detection() {
        let mut r = record();
        r.activity.following = 5_000;
        r.activity.followers = 20;
        r.activity.posts = 3;
        assert!(ProfileModel.flags(&r).has_red(&PROFILE_FOLLOW_RATIO));

        r.activity.followers = 600;
        assert!(!ProfileModel.flags(&r).has_red(&PROFILE_FOLLOW_RATIO));
    }

    #[test]
    fn established_creator_profile() {
        let mut r = record();
        r.age_in_days = Some(2_000);
        r.trust.verified = Some(true);
        r.trust.has_profile_picture = Some(true);
        r.trust.has_bio = Some(true);
        r.activity.followers = 50_000;
        r.activity.following = 300;
        r.activity.posts = 900;
        let card = ProfileModel.score(&r);
        assert_eq!(card.raw(), 50 + 20 + 20 + 5 + 5 + 10 + 5);
        let flags = ProfileModel.flags(&r);
        assert!(flags.red_flags.is_empty());
        assert_eq!(flags.green_flags.len(), 5);
    }
}
