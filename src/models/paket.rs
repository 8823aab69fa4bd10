use phf::phf_map;
use std::str::FromStr;

/// 培训套餐
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Paket {
    Paket1,
    Paket2,
    Paket3,
    Paket4,
    Paket5,
}

static PAKET_BY_SLUG: phf::Map<&'static str, Paket> = phf_map! {
    "paket1" => Paket::Paket1,
    "paket2" => Paket::Paket2,
    "paket3" => Paket::Paket3,
    "paket4" => Paket::Paket4,
    "paket5" => Paket::Paket5,
};

impl Paket {
    /// 全部套餐
    pub const ALL: [Paket; 5] = [
        Paket::Paket1,
        Paket::Paket2,
        Paket::Paket3,
        Paket::Paket4,
        Paket::Paket5,
    ];

    /// 从数据库中的标识解析（忽略首尾空白，大小写敏感）
    pub fn from_slug(slug: &str) -> Option<Self> {
        PAKET_BY_SLUG.get(slug.trim()).copied()
    }

    /// 数据库 / 模板文件使用的标识
    pub fn slug(self) -> &'static str {
        match self {
            Paket::Paket1 => "paket1",
            Paket::Paket2 => "paket2",
            Paket::Paket3 => "paket3",
            Paket::Paket4 => "paket4",
            Paket::Paket5 => "paket5",
        }
    }

    /// 显示名称
    pub fn label(self) -> &'static str {
        match self {
            Paket::Paket1 => "Paket 1",
            Paket::Paket2 => "Paket 2",
            Paket::Paket3 => "Paket 3",
            Paket::Paket4 => "Paket 4",
            Paket::Paket5 => "Paket 5",
        }
    }
}

impl std::fmt::Display for Paket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slug())
    }
}

/// 生成的文档种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DocumentKind {
    /// Kartu Rencana Studi
    #[default]
    Krs,
    /// 培训合同
    Kontrak,
}

impl DocumentKind {
    /// 文件名中使用的标记
    pub fn label(self) -> &'static str {
        match self {
            DocumentKind::Krs => "KRS",
            DocumentKind::Kontrak => "Kontrak",
        }
    }
}

impl FromStr for DocumentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "krs" => Ok(DocumentKind::Krs),
            "kontrak" => Ok(DocumentKind::Kontrak),
            other => Err(format!("未知的文档种类: {}（可选: krs, kontrak）", other)),
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 模板描述
///
/// 模板名称由套餐标识与文档种类一一对应得出，
/// 模板库按 `<name>.docx` 查找文件。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemplateDescriptor {
    pub name: String,
}

impl TemplateDescriptor {
    pub fn resolve(kind: DocumentKind, paket: Paket) -> Self {
        let name = match kind {
            DocumentKind::Krs => paket.slug().to_string(),
            DocumentKind::Kontrak => format!("kontrak_{}", paket.slug()),
        };
        Self { name }
    }

    /// 模板文件名
    pub fn file_name(&self) -> String {
        format!("{}.docx", self.name)
    }
}

impl std::fmt::Display for TemplateDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
