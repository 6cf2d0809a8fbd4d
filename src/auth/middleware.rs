use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    web, Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::token::TokenIssuer;
use crate::error::AppError;

/// Paths under a guarded scope that stay reachable without a token.
const ANONYMOUS_PATHS: [&str; 2] = ["/users/register", "/users/login"];

/// Requires a valid `Authorization: Bearer <token>` header and stores the
/// decoded `Claims` in the request extensions.
///
/// Rejections are answered directly with the `AppError` response instead of
/// being propagated as a service error.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
}

impl<S, B> AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    fn forward(
        &self,
        req: ServiceRequest,
    ) -> LocalBoxFuture<'static, Result<ServiceResponse<EitherBody<B>>, Error>> {
        let fut = self.service.call(req);
        Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
    }

    fn reject(
        req: ServiceRequest,
        app_err: AppError,
    ) -> LocalBoxFuture<'static, Result<ServiceResponse<EitherBody<B>>, Error>> {
        let res = req.error_response(app_err).map_into_right_body();
        Box::pin(async move { Ok(res) })
    }
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if ANONYMOUS_PATHS.iter().any(|path| *path == req.path()) {
            return self.forward(req);
        }

        let issuer = match req.app_data::<web::Data<TokenIssuer>>() {
            Some(issuer) => issuer.clone(),
            None => {
                let app_err = AppError::InternalServerError("TokenIssuer is not registered".into());
                return Self::reject(req, app_err);
            }
        };

        let verified = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(|token| issuer.verify_token(token));

        match verified {
            Some(Ok(claims)) => {
                req.extensions_mut().insert(claims);
                self.forward(req)
            }
            Some(Err(app_err)) => {
                log::debug!("Rejected bearer token on {}: {}", req.path(), app_err);
                Self::reject(req, app_err)
            }
            None => Self::reject(req, AppError::Unauthorized("Missing token".into())),
        }
    }
}
