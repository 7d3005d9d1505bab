/*!
    States of the packet-to-frame decode loop.
*/

/**
    Where the reader is in the packet-to-frame loop.

    ```text
    AwaitingPacket --packet sent--> DecodingBuffered --decoder wants input--> AwaitingPacket
    AwaitingPacket --end of file--> Flushing --decoder drained--> Exhausted
    ```
*/
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DecodeState {
    /// The decoder needs input; the next packet of the stream is read.
    #[default]
    AwaitingPacket,
    /// Input was accepted; pictures are pulled until the decoder asks for more.
    DecodingBuffered,
    /// The container is exhausted; the decoder emits whatever it buffered.
    Flushing,
    /// Nothing is left. Every further read reports end of stream.
    Exhausted,
}

impl DecodeState {
    /**
        Returns true if pictures should be pulled from the decoder in this state.
    */
    pub const fn is_draining(self) -> bool {
        matches!(self, Self::DecodingBuffered | Self::Flushing)
    }

    pub const fn is_exhausted(self) -> bool {
        matches!(self, Self::Exhausted)
    }
}
