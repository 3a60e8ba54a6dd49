// Test fixtures - reusable test data
// Dates, blocks and a seeded store shared by the integration tests

#![allow(dead_code)]

use chrono::NaiveDate;
use day_planner::models::block::{BlockColor, TimeBlock, Track};
use day_planner::services::block::BlockStore;

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Monday, Jan 1 2024
    pub fn jan_1_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    pub fn jan_3_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()
    }

    /// Feb 29, 2024 (leap year)
    pub fn leap_day_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
    }
}

/// Sample blocks for testing
pub mod blocks {
    use super::*;

    pub fn block(id: &str, title: &str, start: u32, end: u32, date: NaiveDate) -> TimeBlock {
        TimeBlock::builder()
            .id(id)
            .title(title)
            .times(start, end)
            .date(date)
            .build()
            .unwrap()
    }

    /// 09:00-10:20 Chemistry
    pub fn chemistry() -> TimeBlock {
        TimeBlock::builder()
            .id("chem")
            .title("Chemistry")
            .description("Past papers 32~38")
            .times(540, 620)
            .color(BlockColor::Pink)
            .date(dates::jan_1_2024())
            .build()
            .unwrap()
    }

    /// 10:20-11:10 Social studies, directly after [`chemistry`]
    pub fn social_studies() -> TimeBlock {
        TimeBlock::builder()
            .id("soc")
            .title("Social studies")
            .times(620, 670)
            .color(BlockColor::Green)
            .date(dates::jan_1_2024())
            .build()
            .unwrap()
    }
}

/// Store with two plan blocks and one execution block on Jan 1 2024.
pub fn seeded_store() -> BlockStore {
    let mut store = BlockStore::new();
    store.add(Track::Plan, blocks::chemistry()).unwrap();
    store.add(Track::Plan, blocks::social_studies()).unwrap();
    store
        .add(
            Track::Execution,
            blocks::block("milk", "Milk from the store", 550, 590, dates::jan_1_2024()),
        )
        .unwrap();
    store
}
