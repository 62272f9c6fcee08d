// Chirps use UUIDv7 so rows sort by creation time; users keep the
// database default (v4).

use uuid::Uuid;

/// Generate a new UUIDv7 (timestamp-sortable).
pub fn uuidv7() -> Uuid {
    Uuid::now_v7()
}
