/*!
    Holding area for a packet the decoder has not accepted yet.
*/

use ffmpeg_next::Packet;

/**
    A compressed packet read from the container but not yet consumed by the decoder.

    While a packet is held, its storage belongs to the cursor and must be
    resubmitted before anything else is read. Once the decoder accepts it,
    [`PendingPacket::release`] frees it and the next packet may be read.
*/
#[derive(Default)]
pub struct PendingPacket {
    packet: Option<Packet>,
}

impl PendingPacket {
    pub fn new() -> Self {
        Self::default()
    }

    /**
        Take ownership of a packet the decoder answered "try again" to.
    */
    pub fn hold(&mut self, packet: Packet) {
        debug_assert!(self.packet.is_none(), "pending packet overwritten");
        self.packet = Some(packet);
    }

    /**
        The held packet, if any.
    */
    pub fn packet(&self) -> Option<&Packet> {
        self.packet.as_ref()
    }

    /**
        Bytes still waiting to be decoded.
    */
    pub fn remaining(&self) -> usize {
        self.packet.as_ref().map_or(0, |p| p.size())
    }

    pub fn is_empty(&self) -> bool {
        self.packet.is_none()
    }

    /**
        Release the held packet after the decoder accepted it.
    */
    pub fn release(&mut self) -> Option<Packet> {
        self.packet.take()
    }
}

impl std::fmt::Debug for PendingPacket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingPacket")
            .field("remaining", &self.remaining())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_by_default() {
        let cursor = PendingPacket::new();
        assert!(cursor.is_empty());
        assert_eq!(cursor.remaining(), 0);
        assert!(cursor.packet().is_none());
    }

    #[test]
    fn hold_then_release() {
        let mut cursor = PendingPacket::new();
        cursor.hold(Packet::copy(&[1, 2, 3, 4, 5]));

        assert!(!cursor.is_empty());
        assert_eq!(cursor.remaining(), 5);
        assert_eq!(cursor.packet().and_then(|p| p.data()), Some(&[1, 2, 3, 4, 5][..]));

        let released = cursor.release().unwrap();
        assert_eq!(released.size(), 5);
        assert!(cursor.is_empty());
        assert!(cursor.release().is_none());
    }
}
