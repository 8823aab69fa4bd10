//! 字段映射服务 - 业务能力层
//!
//! 把嵌套的参与者记录展开为"占位符 → 显示字符串"的平铺映射。
//! 纯函数，无副作用。

use chrono::NaiveDate;

use crate::models::{FieldMapping, Paket, Participant};
use crate::services::date_format::{format_date_id, format_naive_date};

/// 打印日期占位符
pub const PRINT_DATE_KEY: &str = "tanggal_cetak";

/// 展开参与者记录
///
/// 所有已知占位符都会出现在结果中，缺失的属性映射为空字符串。
pub fn map_participant_to_fields(record: &Participant, print_date: NaiveDate) -> FieldMapping {
    let mut fields = FieldMapping::new();

    let pribadi = &record.informasi_pribadi;
    put(&mut fields, "informasiPribadi.namaLengkap", &pribadi.nama_lengkap);
    put(&mut fields, "informasiPribadi.nik", &pribadi.nik);
    put(&mut fields, "informasiPribadi.noTelepon", &pribadi.no_telepon);
    put(&mut fields, "informasiPribadi.alamat", &pribadi.alamat);
    put(&mut fields, "informasiPribadi.jenisKelamin", &pribadi.jenis_kelamin);
    put(&mut fields, "informasiPribadi.tempatLahir", &pribadi.tempat_lahir);
    put(
        &mut fields,
        "informasiPribadi.tanggalLahir",
        &format_date_id(&pribadi.tanggal_lahir),
    );

    let pendidikan = &record.informasi_pendidikan;
    put(
        &mut fields,
        "informasiPendidikan.pendidikanTerakhir",
        &pendidikan.pendidikan_terakhir,
    );
    put(
        &mut fields,
        "informasiPendidikan.pekerjaanSaatIni",
        &pendidikan.pekerjaan_saat_ini,
    );

    let motivasi = &record.informasi_motivasi;
    put(
        &mut fields,
        "informasiMotivasi.alasanMengikuti",
        &motivasi.alasan_mengikuti,
    );
    put(
        &mut fields,
        "informasiMotivasi.sumberInformasi",
        &motivasi.sumber_informasi,
    );

    put(&mut fields, "id", &record.id);
    put(&mut fields, "paketPelatihan", record.paket_pelatihan.trim());
    put(
        &mut fields,
        "namaPaket",
        Paket::from_slug(&record.paket_pelatihan)
            .map(Paket::label)
            .unwrap_or_default(),
    );
    put(&mut fields, "statusPendaftaran", record.status_pendaftaran.as_str());
    put(&mut fields, "statusPeserta", record.status_peserta.as_str());
    put(&mut fields, "tanggalDaftar", &format_date_id(&record.tanggal_daftar));
    put(
        &mut fields,
        "tanggalDiterima",
        &format_date_id(record.tanggal_diterima.as_deref().unwrap_or_default()),
    );
    put(
        &mut fields,
        "tanggalValidasi",
        &format_date_id(record.tanggal_validasi.as_deref().unwrap_or_default()),
    );

    put(&mut fields, PRINT_DATE_KEY, &format_naive_date(print_date));

    fields
}

fn put(fields: &mut FieldMapping, key: &str, value: &str) {
    fields.insert(key.to_string(), value.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{InformasiPribadi, StatusPeserta};

    fn print_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_maps_nested_fields_and_formats_dates() {
        let record = Participant {
            id: "p1".to_string(),
            informasi_pribadi: InformasiPribadi {
                nama_lengkap: "Siti Aminah".to_string(),
                tanggal_lahir: "2001-10-09".to_string(),
                ..Default::default()
            },
            paket_pelatihan: "paket2".to_string(),
            status_peserta: StatusPeserta::Aktif,
            tanggal_daftar: "2024-03-05".to_string(),
            ..Default::default()
        };

        let fields = map_participant_to_fields(&record, print_date());

        assert_eq!(fields["informasiPribadi.namaLengkap"], "Siti Aminah");
        assert_eq!(fields["informasiPribadi.tanggalLahir"], "9 Oktober 2001");
        assert_eq!(fields["tanggalDaftar"], "5 Maret 2024");
        assert_eq!(fields["paketPelatihan"], "paket2");
        assert_eq!(fields["namaPaket"], "Paket 2");
        assert_eq!(fields["statusPeserta"], "aktif");
        assert_eq!(fields[PRINT_DATE_KEY], "1 Juni 2024");
    }

    #[test]
    fn test_missing_attributes_map_to_empty_strings() {
        let fields = map_participant_to_fields(&Participant::default(), print_date());

        for key in [
            "informasiPribadi.alamat",
            "informasiPendidikan.pekerjaanSaatIni",
            "informasiMotivasi.sumberInformasi",
            "tanggalDiterima",
            "tanggalValidasi",
            "namaPaket",
        ] {
            assert_eq!(fields.get(key).map(String::as_str), Some(""), "key {}", key);
        }
    }

    #[test]
    fn test_unparsable_date_passes_through() {
        let record = Participant {
            tanggal_diterima: Some("segera".to_string()),
            ..Default::default()
        };
        let fields = map_participant_to_fields(&record, print_date());
        assert_eq!(fields["tanggalDiterima"], "segera");
    }

    #[test]
    fn test_same_key_set_for_every_record() {
        let empty = map_participant_to_fields(&Participant::default(), print_date());
        let full = map_participant_to_fields(
            &Participant {
                paket_pelatihan: "paket5".to_string(),
                tanggal_diterima: Some("2024-04-01".to_string()),
                ..Default::default()
            },
            print_date(),
        );

        let empty_keys: Vec<_> = empty.keys().collect();
        let full_keys: Vec<_> = full.keys().collect();
        assert_eq!(empty_keys, full_keys);
    }
}
