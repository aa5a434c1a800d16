use serde::{Deserialize, Serialize};

/// TriCore core architecture revisions the front end distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IsaVersion {
    #[serde(rename = "1.3")]
    V1_3,
    #[serde(rename = "1.3.1")]
    V1_3_1,
    #[serde(rename = "1.6")]
    V1_6,
    #[serde(rename = "1.6.1")]
    V1_6_1,
    #[serde(rename = "1.6.2")]
    V1_6_2,
}

impl std::str::FromStr for IsaVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1.3" => Ok(IsaVersion::V1_3),
            "1.3.1" => Ok(IsaVersion::V1_3_1),
            "1.6" => Ok(IsaVersion::V1_6),
            "1.6.1" => Ok(IsaVersion::V1_6_1),
            "1.6.2" => Ok(IsaVersion::V1_6_2),
            _ => Err(format!("unknown isa version `{s}`")),
        }
    }
}

/// PSW.IO privilege level in effect for the translated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Privilege {
    User0,
    User1,
    Supervisor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslateConfig {
    pub isa: IsaVersion,
    pub privilege: Privilege,
    /// Upper bound on guest instructions per block.
    pub max_insns: u32,
    /// Blocks never cross a boundary of this size. Power of two.
    pub page_size: u32,
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            isa: IsaVersion::V1_6_2,
            privilege: Privilege::Supervisor,
            max_insns: 512,
            page_size: 16 * 1024,
        }
    }
}

impl TranslateConfig {
    pub fn has(&self, isa: IsaVersion) -> bool {
        self.isa >= isa
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_ordering_gates_features() {
        let cfg = TranslateConfig { isa: IsaVersion::V1_3_1, ..Default::default() };
        assert!(cfg.has(IsaVersion::V1_3));
        assert!(cfg.has(IsaVersion::V1_3_1));
        assert!(!cfg.has(IsaVersion::V1_6));
    }

    #[test]
    fn partial_json_uses_defaults() {
        let cfg: TranslateConfig = serde_json::from_str(r#"{"isa":"1.3","max_insns":8}"#).unwrap();
        assert_eq!(cfg.isa, IsaVersion::V1_3);
        assert_eq!(cfg.max_insns, 8);
        assert_eq!(cfg.page_size, 16 * 1024);
        assert_eq!(cfg.privilege, Privilege::Supervisor);
    }

    #[test]
    fn parse_isa_flag() {
        assert_eq!("1.6.1".parse::<IsaVersion>(), Ok(IsaVersion::V1_6_1));
        assert!("2.0".parse::<IsaVersion>().is_err());
    }
}
