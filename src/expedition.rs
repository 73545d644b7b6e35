use std::collections::BTreeSet;

use hero_api::{Expedition, ExpeditionStatus};

/// Expeditions split by what the run should do with them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpeditionPlan {
    /// Running; their heroes are unavailable.
    pub ongoing: Vec<Expedition>,
    /// Finished and waiting to be farmed.
    pub completed: Vec<Expedition>,
    /// Free slots, strongest requirement first.
    pub available: Vec<Expedition>,
}

impl ExpeditionPlan {
    /// Partitions `expeditions` at unix time `now`.
    ///
    /// An expedition ending exactly at `now` counts as completed. Unknown
    /// statuses are left out of every bucket.
    pub fn partition(expeditions: Vec<Expedition>, now: i64) -> Self {
        let mut plan = Self::default();
        for expedition in expeditions {
            match expedition.status {
                ExpeditionStatus::Ongoing if expedition.end_time > now => {
                    plan.ongoing.push(expedition)
                }
                ExpeditionStatus::Ongoing => plan.completed.push(expedition),
                ExpeditionStatus::Available => plan.available.push(expedition),
                ExpeditionStatus::Unknown(status) => {
                    tracing::debug!(expedition = expedition.id, status, "skipping expedition");
                }
            }
        }
        plan.available
            .sort_by(|left, right| right.power.cmp(&left.power));
        plan
    }

    /// Heroes assigned to ongoing expeditions.
    pub fn busy_heroes(&self) -> BTreeSet<u64> {
        self.ongoing
            .iter()
            .flat_map(|expedition| expedition.heroes.iter().copied())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const NOW: i64 = 1_700_000_000;

    fn expedition(id: u64, status: ExpeditionStatus, power: u64, end_time: i64) -> Expedition {
        Expedition {
            id,
            status,
            power,
            end_time,
            heroes: Vec::new(),
        }
    }

    fn ids(expeditions: &[Expedition]) -> Vec<u64> {
        expeditions.iter().map(|expedition| expedition.id).collect()
    }

    #[test]
    fn partitions_by_status_and_end_time() {
        let plan = ExpeditionPlan::partition(
            vec![
                expedition(1, ExpeditionStatus::Ongoing, 100, NOW + 60),
                expedition(2, ExpeditionStatus::Ongoing, 100, NOW - 60),
                expedition(3, ExpeditionStatus::Available, 100, 0),
                expedition(4, ExpeditionStatus::Ongoing, 100, NOW),
                expedition(5, ExpeditionStatus::Unknown(9), 100, 0),
            ],
            NOW,
        );

        assert_eq!(ids(&plan.ongoing), vec![1]);
        assert_eq!(ids(&plan.completed), vec![2, 4]);
        assert_eq!(ids(&plan.available), vec![3]);
    }

    #[test]
    fn available_sorted_by_power_descending_and_stable() {
        let plan = ExpeditionPlan::partition(
            vec![
                expedition(1, ExpeditionStatus::Available, 9_000, 0),
                expedition(2, ExpeditionStatus::Available, 120_000, 0),
                expedition(3, ExpeditionStatus::Available, 9_000, 0),
                expedition(4, ExpeditionStatus::Available, 45_000, 0),
            ],
            NOW,
        );

        assert_eq!(ids(&plan.available), vec![2, 4, 1, 3]);
    }

    #[test]
    fn busy_heroes_come_from_ongoing_only() {
        let mut running = expedition(1, ExpeditionStatus::Ongoing, 100, NOW + 10);
        running.heroes = vec![4, 9, 2];
        let mut finished = expedition(2, ExpeditionStatus::Ongoing, 100, NOW - 10);
        finished.heroes = vec![7];

        let plan = ExpeditionPlan::partition(vec![running, finished], NOW);

        assert_eq!(plan.busy_heroes().into_iter().collect::<Vec<_>>(), vec![2, 4, 9]);
    }
}
