use bytemuck::{Pod, Zeroable};

/// A procedurally synthesized sound cue.
/// The numeric value is the wire id the host passes back to `render_cue`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum CueKind {
    /// Double chirp on button press.
    Click = 1,
    /// Short tick when the pointer enters a button.
    Hover = 2,
    /// Rising sawtooth whoosh between screens.
    Transition = 3,
    /// One randomized data blip of the scanning loop. Param: frequency in Hz.
    ScanBlip = 4,
    /// Heartbeat, riser and crash leading into the reveal.
    EnergyBuildup = 5,
}

impl CueKind {
    pub const ALL: [CueKind; 5] = [
        CueKind::Click,
        CueKind::Hover,
        CueKind::Transition,
        CueKind::ScanBlip,
        CueKind::EnergyBuildup,
    ];

    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            1 => Some(Self::Click),
            2 => Some(Self::Hover),
            3 => Some(Self::Transition),
            4 => Some(Self::ScanBlip),
            5 => Some(Self::EnergyBuildup),
            _ => None,
        }
    }

    pub fn as_u32(self) -> u32 {
        self as u32
    }
}

/// A sound event emitted by the game logic and read by the host each frame.
/// Wire layout: `[cue, param]` as two f32 values.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SoundEvent {
    pub cue: f32,
    pub param: f32,
}

impl SoundEvent {
    pub const FLOATS: usize = 2;

    pub fn new(kind: CueKind, param: f32) -> Self {
        Self {
            cue: kind.as_u32() as f32,
            param,
        }
    }

    /// Decode the cue id. Returns None for a corrupted or zeroed slot.
    pub fn kind(&self) -> Option<CueKind> {
        CueKind::from_u32(self.cue as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cue_ids_roundtrip() {
        for kind in CueKind::ALL {
            assert_eq!(CueKind::from_u32(kind.as_u32()), Some(kind));
        }
        assert_eq!(CueKind::from_u32(0), None);
        assert_eq!(CueKind::from_u32(99), None);
    }

    #[test]
    fn sound_event_wire_layout() {
        let events = [
            SoundEvent::new(CueKind::ScanBlip, 1234.0),
            SoundEvent::new(CueKind::Click, 0.0),
        ];
        let floats: &[f32] = bytemuck::cast_slice(&events);
        assert_eq!(floats.len(), 2 * SoundEvent::FLOATS);
        assert_eq!(floats, &[4.0, 1234.0, 1.0, 0.0]);
        assert_eq!(events[0].kind(), Some(CueKind::ScanBlip));
    }
}
