use crate::domain::model::CalendarDate;
use crate::domain::ports::Clock;

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> CalendarDate {
        chrono::Local::now().date_naive()
    }
}

/// 固定日期的時鐘，測試與 `--today` 使用
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    today: CalendarDate,
}

impl FixedClock {
    pub fn new(today: CalendarDate) -> Self {
        Self { today }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> CalendarDate {
        self.today
    }
}
