use chrono::NaiveDate;

use shared_models::Slot;

/// A doctor's slots bucketed by calendar date, in the order dates first
/// appear in the server response (the server already sorts by date and
/// time). Derived wholesale from the flat slot list; never patched
/// incrementally.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScheduleByDate {
    days: Vec<DaySchedule>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DaySchedule {
    pub date: NaiveDate,
    pub slots: Vec<Slot>,
}

impl ScheduleByDate {
    /// Group a flat slot list by its `date` field. Every slot lands in
    /// exactly one bucket; within a bucket the server's ordering is kept
    /// untouched.
    pub fn group(slots: Vec<Slot>) -> Self {
        let mut days: Vec<DaySchedule> = Vec::new();

        for slot in slots {
            match days.iter_mut().find(|day| day.date == slot.date) {
                Some(day) => day.slots.push(slot),
                None => days.push(DaySchedule {
                    date: slot.date,
                    slots: vec![slot],
                }),
            }
        }

        Self { days }
    }

    pub fn days(&self) -> &[DaySchedule] {
        &self.days
    }

    /// An empty schedule is a valid state: the doctor has no upcoming slots.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn slot_count(&self) -> usize {
        self.days.iter().map(|day| day.slots.len()).sum()
    }

    pub fn find_slot(&self, slot_id: i64) -> Option<&Slot> {
        self.days
            .iter()
            .flat_map(|day| day.slots.iter())
            .find(|slot| slot.id == slot_id)
    }
}
