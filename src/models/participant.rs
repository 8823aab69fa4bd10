use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;
use std::str::FromStr;

/// 参与者（peserta）记录
///
/// 字段名与实时数据库中的 JSON 字段保持一致（驼峰命名）。
/// 记录在报名审核通过后创建，之后只做字段修改和状态流转，不做物理删除。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    /// 记录 ID（数据库中的 key，正文中可能缺失）
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub informasi_pribadi: InformasiPribadi,
    #[serde(default)]
    pub informasi_pendidikan: InformasiPendidikan,
    #[serde(default)]
    pub informasi_motivasi: InformasiMotivasi,
    /// 培训套餐标识（`paket1`…`paket5`），保留原始字符串以便识别缺失/无效值
    #[serde(default)]
    pub paket_pelatihan: String,
    #[serde(default)]
    pub status_pendaftaran: StatusPendaftaran,
    #[serde(default)]
    pub status_peserta: StatusPeserta,
    #[serde(default, deserialize_with = "date_value")]
    pub tanggal_daftar: String,
    #[serde(
        default,
        deserialize_with = "optional_date_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub tanggal_diterima: Option<String>,
    #[serde(
        default,
        deserialize_with = "optional_date_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub tanggal_validasi: Option<String>,
}

/// 个人信息
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InformasiPribadi {
    pub nama_lengkap: String,
    pub nik: String,
    pub no_telepon: String,
    pub alamat: String,
    pub jenis_kelamin: String,
    pub tempat_lahir: String,
    #[serde(deserialize_with = "date_value")]
    pub tanggal_lahir: String,
}

/// 学历 / 工作信息
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InformasiPendidikan {
    pub pendidikan_terakhir: String,
    pub pekerjaan_saat_ini: String,
}

/// 报名动机
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InformasiMotivasi {
    pub alasan_mengikuti: String,
    pub sumber_informasi: String,
}

/// 报名审核状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusPendaftaran {
    #[default]
    Menunggu,
    Disetujui,
    Ditolak,
}

impl StatusPendaftaran {
    pub fn as_str(self) -> &'static str {
        match self {
            StatusPendaftaran::Menunggu => "menunggu",
            StatusPendaftaran::Disetujui => "disetujui",
            StatusPendaftaran::Ditolak => "ditolak",
        }
    }
}

/// 参与者状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusPeserta {
    #[default]
    Baru,
    Aktif,
    Lulus,
    Ditolak,
}

impl StatusPeserta {
    pub fn as_str(self) -> &'static str {
        match self {
            StatusPeserta::Baru => "baru",
            StatusPeserta::Aktif => "aktif",
            StatusPeserta::Lulus => "lulus",
            StatusPeserta::Ditolak => "ditolak",
        }
    }
}

impl FromStr for StatusPeserta {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "baru" => Ok(StatusPeserta::Baru),
            "aktif" => Ok(StatusPeserta::Aktif),
            "lulus" => Ok(StatusPeserta::Lulus),
            "ditolak" => Ok(StatusPeserta::Ditolak),
            other => Err(format!(
                "未知的参与者状态: {}（可选: baru, aktif, lulus, ditolak）",
                other
            )),
        }
    }
}

impl std::fmt::Display for StatusPeserta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ========== 局部更新 ==========

/// 参与者的局部更新
///
/// 每个子结构单独可选；子结构内部逐字段覆盖，未指定的字段保持原值。
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParticipantUpdate {
    pub informasi_pribadi: Option<InformasiPribadiUpdate>,
    pub informasi_pendidikan: Option<InformasiPendidikanUpdate>,
    pub informasi_motivasi: Option<InformasiMotivasiUpdate>,
    pub paket_pelatihan: Option<String>,
    pub status_pendaftaran: Option<StatusPendaftaran>,
    pub status_peserta: Option<StatusPeserta>,
    pub tanggal_diterima: Option<String>,
    pub tanggal_validasi: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InformasiPribadiUpdate {
    pub nama_lengkap: Option<String>,
    pub nik: Option<String>,
    pub no_telepon: Option<String>,
    pub alamat: Option<String>,
    pub jenis_kelamin: Option<String>,
    pub tempat_lahir: Option<String>,
    pub tanggal_lahir: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InformasiPendidikanUpdate {
    pub pendidikan_terakhir: Option<String>,
    pub pekerjaan_saat_ini: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InformasiMotivasiUpdate {
    pub alasan_mengikuti: Option<String>,
    pub sumber_informasi: Option<String>,
}

fn set(target: &mut String, value: &Option<String>) {
    if let Some(v) = value {
        target.clone_from(v);
    }
}

impl InformasiPribadiUpdate {
    fn apply_to(&self, target: &mut InformasiPribadi) {
        set(&mut target.nama_lengkap, &self.nama_lengkap);
        set(&mut target.nik, &self.nik);
        set(&mut target.no_telepon, &self.no_telepon);
        set(&mut target.alamat, &self.alamat);
        set(&mut target.jenis_kelamin, &self.jenis_kelamin);
        set(&mut target.tempat_lahir, &self.tempat_lahir);
        set(&mut target.tanggal_lahir, &self.tanggal_lahir);
    }
}

impl InformasiPendidikanUpdate {
    fn apply_to(&self, target: &mut InformasiPendidikan) {
        set(&mut target.pendidikan_terakhir, &self.pendidikan_terakhir);
        set(&mut target.pekerjaan_saat_ini, &self.pekerjaan_saat_ini);
    }
}

impl InformasiMotivasiUpdate {
    fn apply_to(&self, target: &mut InformasiMotivasi) {
        set(&mut target.alasan_mengikuti, &self.alasan_mengikuti);
        set(&mut target.sumber_informasi, &self.sumber_informasi);
    }
}

impl Participant {
    /// 应用局部更新
    pub fn apply_update(&mut self, update: &ParticipantUpdate) {
        if let Some(pribadi) = &update.informasi_pribadi {
            pribadi.apply_to(&mut self.informasi_pribadi);
        }
        if let Some(pendidikan) = &update.informasi_pendidikan {
            pendidikan.apply_to(&mut self.informasi_pendidikan);
        }
        if let Some(motivasi) = &update.informasi_motivasi {
            motivasi.apply_to(&mut self.informasi_motivasi);
        }
        set(&mut self.paket_pelatihan, &update.paket_pelatihan);
        if let Some(status) = update.status_pendaftaran {
            self.status_pendaftaran = status;
        }
        if let Some(status) = update.status_peserta {
            self.status_peserta = status;
        }
        if update.tanggal_diterima.is_some() {
            self.tanggal_diterima.clone_from(&update.tanggal_diterima);
        }
        if update.tanggal_validasi.is_some() {
            self.tanggal_validasi.clone_from(&update.tanggal_validasi);
        }
    }

    /// 显示名称（姓名为空时退回到记录 ID）
    pub fn display_name(&self) -> &str {
        let name = self.informasi_pribadi.nama_lengkap.trim();
        if name.is_empty() {
            &self.id
        } else {
            name
        }
    }
}

// ========== 日期字段反序列化 ==========
// 日期在数据库中可能是 ISO 字符串，也可能是毫秒时间戳

fn date_value<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_date_value(deserializer)?.unwrap_or_default())
}

fn optional_date_value<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<JsonValue>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(JsonValue::Null) => None,
        Some(JsonValue::String(s)) => Some(s),
        Some(JsonValue::Number(n)) => Some(n.to_string()),
        Some(other) => Some(other.to_string()),
    })
}
