pub mod generation;
pub mod paket;
pub mod participant;

pub use generation::{FieldMapping, GeneratedDocument, GenerationResult};
pub use paket::{DocumentKind, Paket, TemplateDescriptor};
pub use participant::{
    InformasiMotivasi, InformasiMotivasiUpdate, InformasiPendidikan, InformasiPendidikanUpdate,
    InformasiPribadi, InformasiPribadiUpdate, Participant, ParticipantUpdate, StatusPendaftaran,
    StatusPeserta,
};
