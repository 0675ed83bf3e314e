use std::marker::PhantomData;

use async_graphql::{
    http::GraphiQLSource, Context, EmptySubscription, ErrorExtensions, Object, Schema,
};
use async_graphql_axum::GraphQL;
use axum::{
    response::{Html, IntoResponse},
    routing::get,
    Router,
};

use crate::models::{Product, ProductInput};
use crate::repository::ProductRepository;
use crate::service::ProductService;

pub const GRAPHQL_PATH: &str = "/graphql";

pub type CatalogSchema<R> = Schema<QueryRoot<R>, MutationRoot<R>, EmptySubscription>;

/// Build the schema with `service` injected as context data.
pub fn build_schema<R: ProductRepository + 'static>(service: ProductService<R>) -> CatalogSchema<R> {
    Schema::build(
        QueryRoot(PhantomData),
        MutationRoot(PhantomData),
        EmptySubscription,
    )
    .data(service)
    .finish()
}

/// `POST /graphql` executes operations, `GET /graphql` serves GraphiQL.
pub fn router<R: ProductRepository + 'static>(schema: CatalogSchema<R>) -> Router {
    Router::new().route(GRAPHQL_PATH, get(graphiql).post_service(GraphQL::new(schema)))
}

async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}

fn service<'a, R: ProductRepository + 'static>(
    ctx: &'a Context<'_>,
) -> async_graphql::Result<&'a ProductService<R>> {
    ctx.data::<ProductService<R>>()
}

pub struct QueryRoot<R>(PhantomData<R>);

#[Object]
impl<R: ProductRepository + 'static> QueryRoot<R> {
    async fn get_product(&self, ctx: &Context<'_>, id: String) -> async_graphql::Result<Product> {
        service::<R>(ctx)?
            .get_product(&id)
            .await
            .map_err(|e| e.extend())
    }

    /// Up to two products matching `term`, best match first
    async fn get_all_products_with_term(
        &self,
        ctx: &Context<'_>,
        term: String,
    ) -> async_graphql::Result<Vec<Product>> {
        service::<R>(ctx)?
            .get_all_products_with_term(&term)
            .await
            .map_err(|e| e.extend())
    }
}

pub struct MutationRoot<R>(PhantomData<R>);

#[Object]
impl<R: ProductRepository + 'static> MutationRoot<R> {
    /// Stores the product under a new key and returns it with that key
    async fn create_product(
        &self,
        ctx: &Context<'_>,
        product: ProductInput,
    ) -> async_graphql::Result<Product> {
        service::<R>(ctx)?
            .create_product(product)
            .await
            .map_err(|e| e.extend())
    }

    async fn delete_product(&self, ctx: &Context<'_>, id: String) -> async_graphql::Result<bool> {
        service::<R>(ctx)?
            .delete_product(&id)
            .await
            .map_err(|e| e.extend())
    }

    /// Replaces the stored product; omitted fields are removed
    async fn update_product(
        &self,
        ctx: &Context<'_>,
        id: String,
        product: ProductInput,
    ) -> async_graphql::Result<Product> {
        service::<R>(ctx)?
            .update_product(&id, product)
            .await
            .map_err(|e| e.extend())
    }

    async fn set_quantity(
        &self,
        ctx: &Context<'_>,
        id: String,
        quantity: i32,
    ) -> async_graphql::Result<bool> {
        service::<R>(ctx)?
            .set_quantity(&id, quantity)
            .await
            .map_err(|e| e.extend())
    }
}
