//! Request and response bodies

pub mod token_dto;

pub use token_dto::{
    IntrospectRequest, IntrospectResponse, IssueTokensRequest, RefreshTokenRequest,
    RevokeTokenRequest, TokenResponse,
};
