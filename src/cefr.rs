//! CEFR语言等级
//!
//! 欧洲共同语言参考标准的六个等级构成一个全序（A1 < A2 < B1 < B2 < C1 < C2）。
//! 等级运算（升/降 N 级）越界时返回 `None`，从不报错。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// CEFR等级，序数1..6
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum CefrLevel {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

impl CefrLevel {
    /// 全部等级，按从低到高排列
    pub const ALL: [CefrLevel; 6] = [
        CefrLevel::A1,
        CefrLevel::A2,
        CefrLevel::B1,
        CefrLevel::B2,
        CefrLevel::C1,
        CefrLevel::C2,
    ];

    /// 等级序数（A1=1 .. C2=6）
    pub fn order(&self) -> u8 {
        match self {
            CefrLevel::A1 => 1,
            CefrLevel::A2 => 2,
            CefrLevel::B1 => 3,
            CefrLevel::B2 => 4,
            CefrLevel::C1 => 5,
            CefrLevel::C2 => 6,
        }
    }

    fn from_order(order: u8) -> Option<CefrLevel> {
        match order {
            1 => Some(CefrLevel::A1),
            2 => Some(CefrLevel::A2),
            3 => Some(CefrLevel::B1),
            4 => Some(CefrLevel::B2),
            5 => Some(CefrLevel::C1),
            6 => Some(CefrLevel::C2),
            _ => None,
        }
    }

    /// 降低 `steps` 级，低于A1时返回 `None`
    pub fn lower(&self, steps: u8) -> Option<CefrLevel> {
        self.order()
            .checked_sub(steps)
            .and_then(CefrLevel::from_order)
    }

    /// 提高 `steps` 级，高于C2时返回 `None`
    pub fn higher(&self, steps: u8) -> Option<CefrLevel> {
        self.order()
            .checked_add(steps)
            .and_then(CefrLevel::from_order)
    }

    /// 不超过 `max` 的所有等级，用于等级选择界面的候选范围
    ///
    /// 候选项永远不高于文档的原始等级。
    pub fn levels_up_to(max: CefrLevel) -> Vec<CefrLevel> {
        CefrLevel::ALL
            .iter()
            .copied()
            .filter(|level| *level <= max)
            .collect()
    }

    /// 等级的习惯性名称
    pub fn name(&self) -> &'static str {
        match self {
            CefrLevel::A1 => "Beginner",
            CefrLevel::A2 => "Elementary",
            CefrLevel::B1 => "Intermediate",
            CefrLevel::B2 => "Upper Intermediate",
            CefrLevel::C1 => "Advanced",
            CefrLevel::C2 => "Proficiency",
        }
    }

    /// 等级能力描述
    pub fn description(&self) -> &'static str {
        match self {
            CefrLevel::A1 => {
                "Can understand and use familiar everyday expressions and very basic phrases."
            }
            CefrLevel::A2 => {
                "Can understand sentences and frequently used expressions related to areas of most immediate relevance."
            }
            CefrLevel::B1 => {
                "Can understand the main points of clear standard input on familiar matters."
            }
            CefrLevel::B2 => {
                "Can understand the main ideas of complex text on both concrete and abstract topics."
            }
            CefrLevel::C1 => "Can understand a wide range of demanding, longer texts.",
            CefrLevel::C2 => "Can understand with ease virtually everything heard or read.",
        }
    }

    /// 等级代码（"A1".."C2"）
    pub fn code(&self) -> &'static str {
        match self {
            CefrLevel::A1 => "A1",
            CefrLevel::A2 => "A2",
            CefrLevel::B1 => "B1",
            CefrLevel::B2 => "B2",
            CefrLevel::C1 => "C1",
            CefrLevel::C2 => "C2",
        }
    }
}

impl fmt::Display for CefrLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for CefrLevel {
    type Err = crate::core::ReaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A1" => Ok(CefrLevel::A1),
            "A2" => Ok(CefrLevel::A2),
            "B1" => Ok(CefrLevel::B1),
            "B2" => Ok(CefrLevel::B2),
            "C1" => Ok(CefrLevel::C1),
            "C2" => Ok(CefrLevel::C2),
            other => Err(crate::core::ReaderError::new(&format!(
                "无效的CEFR等级: {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_order() {
        for pair in CefrLevel::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_lower_level() {
        assert_eq!(CefrLevel::B2.lower(1), Some(CefrLevel::B1));
        assert_eq!(CefrLevel::B2.lower(2), Some(CefrLevel::A2));
        assert_eq!(CefrLevel::B2.lower(3), Some(CefrLevel::A1));
        // 越过A1
        assert_eq!(CefrLevel::B2.lower(4), None);
        assert_eq!(CefrLevel::A1.lower(1), None);
        assert_eq!(CefrLevel::A1.lower(0), Some(CefrLevel::A1));
    }

    #[test]
    fn test_higher_level() {
        assert_eq!(CefrLevel::A2.higher(1), Some(CefrLevel::B1));
        assert_eq!(CefrLevel::C1.higher(1), Some(CefrLevel::C2));
        // 越过C2
        assert_eq!(CefrLevel::C2.higher(1), None);
        assert_eq!(CefrLevel::A1.higher(6), None);
    }

    #[test]
    fn test_step_distance_is_exact() {
        // lower(s) 必须正好落在序数上低 s 位的等级
        for level in CefrLevel::ALL {
            for steps in 0..=6u8 {
                match level.lower(steps) {
                    Some(lowered) => assert_eq!(lowered.order(), level.order() - steps),
                    None => assert!(level.order() <= steps),
                }
                match level.higher(steps) {
                    Some(raised) => assert_eq!(raised.order(), level.order() + steps),
                    None => assert!(level.order() + steps > 6),
                }
            }
        }
    }

    #[test]
    fn test_levels_up_to() {
        let offered = CefrLevel::levels_up_to(CefrLevel::B1);
        assert_eq!(offered, vec![CefrLevel::A1, CefrLevel::A2, CefrLevel::B1]);
        assert_eq!(CefrLevel::levels_up_to(CefrLevel::C2).len(), 6);
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("b2".parse::<CefrLevel>().unwrap(), CefrLevel::B2);
        assert_eq!(" C1 ".parse::<CefrLevel>().unwrap(), CefrLevel::C1);
        assert!("D1".parse::<CefrLevel>().is_err());
        assert_eq!(CefrLevel::A2.to_string(), "A2");
    }
}
