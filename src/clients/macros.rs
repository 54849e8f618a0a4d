/// Generates a client method that sends one request variant and awaits its oneshot reply.
///
/// Transport failures (service gone, reply dropped) become
/// [`ShopError::ActorCommunicationError`](crate::error::ShopError::ActorCommunicationError);
/// domain errors from the service pass through untouched.
macro_rules! client_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $request:ident::$variant:ident) => {
        impl $client {
            #[tracing::instrument(skip(self))]
            pub async fn $method(&self, $($param: $param_type),*) -> Result<$return_type, $crate::error::ShopError> {
                tracing::debug!("Sending request");
                let (respond_to, response) = tokio::sync::oneshot::channel();
                self.sender.send($request::$variant {
                    $($param,)*
                    respond_to,
                }).await.map_err(|_| $crate::error::ShopError::ActorCommunicationError("Service closed".to_string()))?;

                response.await.map_err(|_| $crate::error::ShopError::ActorCommunicationError("Service dropped the request".to_string()))?
            }
        }
    };
}
