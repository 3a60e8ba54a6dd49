use chrono::NaiveDate;

use crate::models::block::{BlockColor, BlockId, TimeBlock};

fn seed(
    id: &str,
    title: &str,
    description: Option<&str>,
    start: u32,
    end: u32,
    color: BlockColor,
    date: NaiveDate,
) -> TimeBlock {
    TimeBlock {
        id: BlockId::from(id),
        title: title.to_string(),
        description: description.map(str::to_string),
        start,
        end,
        color,
        date,
        group_id: None,
    }
}

/// Sample study plan shown on first launch.
pub fn default_plan_blocks(today: NaiveDate) -> Vec<TimeBlock> {
    vec![
        seed("p1", "Chemistry I", Some("Past papers\n32~38"), 9 * 60, 10 * 60 + 20, BlockColor::Pink, today),
        seed("p2", "Social studies", Some("Assessment prep"), 10 * 60 + 20, 11 * 60 + 10, BlockColor::Green, today),
        seed("p3", "Literature", Some("Lessons 6, 7"), 17 * 60, 18 * 60, BlockColor::Orange, today),
        seed("p4", "English", Some("Vocabulary\nDay 31~32"), 18 * 60, 18 * 60 + 40, BlockColor::Yellow, today),
        seed("p5", "Mathematics", Some("Workbook\n20~28"), 18 * 60 + 40, 20 * 60, BlockColor::Blue, today),
    ]
}

/// Sample log of what actually happened, matching [`default_plan_blocks`].
pub fn default_execution_blocks(today: NaiveDate) -> Vec<TimeBlock> {
    vec![
        seed("e1", "Milk from the store", Some("Groceries"), 9 * 60 + 10, 9 * 60 + 50, BlockColor::Gray, today),
        seed("e2", "English", Some("Mathematics\nWorkbook"), 17 * 60, 17 * 60 + 40, BlockColor::Yellow, today),
        seed("e3", "Dinner", None, 18 * 60, 18 * 60 + 20, BlockColor::Gray, today),
        seed("e4", "Korean", Some("Literature\nLessons 6~8"), 18 * 60 + 20, 19 * 60 + 30, BlockColor::Orange, today),
    ]
}
