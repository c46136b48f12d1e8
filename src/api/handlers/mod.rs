//! One handler family per entity. Each family exposes list / create /
//! update / delete with the re-read-after-write pattern: mutations return
//! the affected row in the same joined shape the list endpoint uses.

pub mod citas;
pub mod doctores;
pub mod historial;
pub mod pacientes;
pub mod personas;
pub mod usuarios;
