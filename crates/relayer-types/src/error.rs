use flex_error::{define_error, TraceError};

define_error! {
    Error {
        InvalidHeight
            { height: String }
            |e| { format_args!("cannot parse height from '{}'", e.height) },

        ZeroHeight
            |_| { "attempted to create an invalid zero height" },

        InvalidIdentifier
            {
                id: String,
                reason: String,
            }
            |e| { format_args!("identifier '{}' is invalid: {}", e.id, e.reason) },

        EmptySigner
            |_| { "signer cannot be empty" },

        UnknownOrderType
            { order: String }
            |e| { format_args!("invalid channel ordering '{}'", e.order) },

        MissingRawClientState
            |_| { "missing raw client state" },

        MissingRawConsensusState
            |_| { "missing raw consensus state" },

        MissingRawClientMessage
            |_| { "missing raw client message" },

        UnexpectedTypeUrl
            {
                expected: String,
                actual: String,
            }
            |e| { format_args!("unexpected type url: expected '{}', got '{}'", e.expected, e.actual) },

        Decode
            [ TraceError<prost::DecodeError> ]
            |_| { "failed to decode protobuf message" },
    }
}
