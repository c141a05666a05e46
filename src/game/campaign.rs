// Campaign progress as a set of named status flags

use crate::game::persistence::CampaignPort;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CampaignTracker {
    /// Set flags in the order they were first set
    statuses: Vec<String>,
}

impl CampaignTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(&self, status: &str) -> bool {
        self.statuses.iter().any(|s| s == status)
    }

    pub fn set(&mut self, status: &str) {
        let status = status.trim();
        if !status.is_empty() && !self.check(status) {
            self.statuses.push(status.to_string());
        }
    }

    pub fn unset(&mut self, status: &str) {
        self.statuses.retain(|s| s != status);
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }
}

impl CampaignPort for CampaignTracker {
    fn get_all(&self) -> String {
        self.statuses.join(",")
    }

    fn set_all(&mut self, all: &str) {
        self.statuses.clear();
        for status in all.split(',') {
            self.set(status);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_check() {
        let mut campaign = CampaignTracker::new();
        campaign.set("met_guard");
        campaign.set("met_guard");
        assert!(campaign.check("met_guard"));
        assert!(!campaign.check("met_king"));
        assert_eq!(campaign.len(), 1);

        campaign.unset("met_guard");
        assert!(campaign.is_empty());
    }

    #[test]
    fn test_get_all_keeps_order() {
        let mut campaign = CampaignTracker::new();
        campaign.set("b");
        campaign.set("a");
        assert_eq!(campaign.get_all(), "b,a");
    }

    #[test]
    fn test_set_all_skips_blanks() {
        let mut campaign = CampaignTracker::new();
        campaign.set("stale");
        campaign.set_all(" found_key ,,opened_gate,");
        assert_eq!(campaign.get_all(), "found_key,opened_gate");
        assert!(!campaign.check("stale"));

        campaign.set_all("");
        assert!(campaign.is_empty());
    }
}
